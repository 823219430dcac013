//! Style recovery for reopened workbooks.
//!
//! The value reader does not expose formats, so cell styles and column widths
//! are read from the package parts directly: `xl/styles.xml` resolves every
//! `cellXfs` record to a [`SpecCellFormat`], and each worksheet part maps its
//! cells to those records.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use roxmltree::{Document, Node};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{Result, XlsxKitError};
use crate::spec::SpecCellFormat;
use crate::util::derive_cell_index;

const C_PART_STYLES: &str = "xl/styles.xml";
const C_PART_WORKBOOK: &str = "xl/workbook.xml";
const C_PART_WORKBOOK_RELS: &str = "xl/_rels/workbook.xml.rels";
const C_NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

// Calibri 11 metrics the serializer uses for character widths.
const N_PX_DIGIT_WIDTH: f64 = 7.0;
const N_PX_CELL_PADDING: f64 = 5.0;

/// Formats and widths recovered for one worksheet.
#[derive(Debug, Clone, Default)]
pub(crate) struct SpecSheetStyles {
    /// Non-default cell formats by zero-based `(row, col)`.
    pub dict_cell_formats: BTreeMap<(usize, usize), SpecCellFormat>,
    /// Custom column widths by zero-based column.
    pub dict_col_widths: BTreeMap<usize, f64>,
}

/// Read formats and widths of every worksheet in `path`, keyed by sheet name.
pub(crate) fn read_sheet_styles(path: &Path) -> Result<HashMap<String, SpecSheetStyles>> {
    let file = BufReader::new(File::open(path)?);
    let mut zip = ZipArchive::new(file)?;

    let l_xf_formats = match read_part(&mut zip, C_PART_STYLES)? {
        Some(xml) => derive_xf_formats(&xml)?,
        None => Vec::new(),
    };
    let xml_workbook = read_required_part(&mut zip, C_PART_WORKBOOK)?;
    let xml_rels = read_required_part(&mut zip, C_PART_WORKBOOK_RELS)?;

    let mut dict_styles = HashMap::new();
    for (sheet_name, c_part) in derive_sheet_parts(&xml_workbook, &xml_rels)? {
        let Some(xml_sheet) = read_part(&mut zip, &c_part)? else {
            log::warn!("worksheet part {c_part:?} of {sheet_name:?} is missing");
            continue;
        };
        dict_styles.insert(sheet_name, derive_sheet_styles(&xml_sheet, &l_xf_formats)?);
    }
    Ok(dict_styles)
}

////////////////////////////////////////////////////////////////////////////////
// #region Package

fn read_part<R: Read + Seek>(zip: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut file = match zip.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let mut c_xml = String::new();
    file.read_to_string(&mut c_xml)?;
    Ok(Some(c_xml))
}

fn read_required_part<R: Read + Seek>(zip: &mut ZipArchive<R>, name: &str) -> Result<String> {
    read_part(zip, name)?.ok_or_else(|| XlsxKitError::InvalidPackage {
        part: name.to_string(),
        reason: "part is missing".to_string(),
    })
}

/// Sheet names paired with their worksheet part, in workbook order.
fn derive_sheet_parts(xml_workbook: &str, xml_rels: &str) -> Result<Vec<(String, String)>> {
    let doc_rels = Document::parse(xml_rels)?;
    let dict_targets: HashMap<&str, &str> = doc_rels
        .descendants()
        .filter(|node| node.has_tag_name("Relationship"))
        .filter_map(|node| Some((node.attribute("Id")?, node.attribute("Target")?)))
        .collect();

    let doc_workbook = Document::parse(xml_workbook)?;
    let mut l_parts = Vec::new();
    for node in doc_workbook
        .descendants()
        .filter(|node| node.has_tag_name("sheet"))
    {
        let (Some(sheet_name), Some(rel_id)) = (
            node.attribute("name"),
            node.attribute((C_NS_RELATIONSHIPS, "id")),
        ) else {
            continue;
        };
        match dict_targets.get(rel_id) {
            Some(target) => l_parts.push((sheet_name.to_string(), derive_part_name(target))),
            None => log::warn!("sheet {sheet_name:?} has no relationship {rel_id:?}"),
        }
    }
    Ok(l_parts)
}

fn derive_part_name(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(c_absolute) => c_absolute.to_string(),
        None => format!("xl/{target}"),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StyleSheet

/// Resolve every `cellXfs` record to a format, indexed like the record list.
///
/// Font properties equal to the default font are left unset.
fn derive_xf_formats(xml: &str) -> Result<Vec<SpecCellFormat>> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    let dict_num_fmts: HashMap<usize, String> = derive_children(root, "numFmts", "numFmt")
        .filter_map(|node| {
            Some((
                node.attribute("numFmtId")?.parse().ok()?,
                node.attribute("formatCode")?.to_string(),
            ))
        })
        .collect();
    let l_fonts: Vec<SpecCellFormat> = derive_children(root, "fonts", "font")
        .map(derive_font_format)
        .collect();
    let font_default = l_fonts.first().cloned().unwrap_or_default();
    let l_fills: Vec<SpecCellFormat> = derive_children(root, "fills", "fill")
        .map(derive_fill_format)
        .collect();
    let l_borders: Vec<SpecCellFormat> = derive_children(root, "borders", "border")
        .map(derive_border_format)
        .collect();

    let l_xf_formats = derive_children(root, "cellXfs", "xf")
        .map(|node| {
            let mut format = SpecCellFormat::default();
            let n_font = derive_index(node, "fontId");
            if n_font > 0
                && let Some(font) = l_fonts.get(n_font)
            {
                format = format.merge(&derive_font_delta(font, &font_default));
            }
            if let Some(fill) = l_fills.get(derive_index(node, "fillId")) {
                format = format.merge(fill);
            }
            if let Some(border) = l_borders.get(derive_index(node, "borderId")) {
                format = format.merge(border);
            }
            format.num_format = derive_num_format(derive_index(node, "numFmtId"), &dict_num_fmts);
            if let Some(alignment) = node.children().find(|child| child.has_tag_name("alignment")) {
                format = format.merge(&derive_alignment_format(alignment));
            }
            format
        })
        .collect();
    Ok(l_xf_formats)
}

fn derive_children<'a, 'input>(
    root: Node<'a, 'input>,
    c_parent: &'static str,
    c_child: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    root.children()
        .filter(move |node| node.has_tag_name(c_parent))
        .flat_map(move |node| {
            node.children()
                .filter(move |child| child.has_tag_name(c_child))
        })
}

fn derive_index(node: Node<'_, '_>, c_attr: &str) -> usize {
    node.attribute(c_attr)
        .and_then(|val| val.parse().ok())
        .unwrap_or(0)
}

fn derive_font_format(node: Node<'_, '_>) -> SpecCellFormat {
    let mut format = SpecCellFormat::default();
    for child in node.children().filter(|child| child.is_element()) {
        match child.tag_name().name() {
            "b" => format.bold = Some(derive_flag(child)),
            "i" => format.italic = Some(derive_flag(child)),
            "sz" => {
                format.font_size = child
                    .attribute("val")
                    .and_then(|val| val.parse::<f64>().ok())
                    .map(|val| val.round() as i64);
            }
            "color" => format.font_color = derive_rgb_color(child),
            "name" => format.font_name = child.attribute("val").map(str::to_string),
            _ => {}
        }
    }
    format
}

fn derive_font_delta(font: &SpecCellFormat, font_default: &SpecCellFormat) -> SpecCellFormat {
    SpecCellFormat {
        font_name: font
            .font_name
            .clone()
            .filter(|name| Some(name) != font_default.font_name.as_ref()),
        font_size: font.font_size.filter(|size| Some(*size) != font_default.font_size),
        bold: font.bold.filter(|val| *val),
        italic: font.italic.filter(|val| *val),
        font_color: font
            .font_color
            .clone()
            .filter(|color| Some(color) != font_default.font_color.as_ref()),
        ..Default::default()
    }
}

// `<b/>` means on; only an explicit false value turns it off.
fn derive_flag(node: Node<'_, '_>) -> bool {
    !matches!(node.attribute("val"), Some("0") | Some("false"))
}

/// `rgb="FFEBF1DE"` becomes `#EBF1DE`; theme and indexed colors are skipped.
fn derive_rgb_color(node: Node<'_, '_>) -> Option<String> {
    let c_argb = node.attribute("rgb")?;
    let c_rgb = c_argb.get(c_argb.len().checked_sub(6)?..)?;
    Some(format!("#{}", c_rgb.to_ascii_uppercase()))
}

fn derive_fill_format(node: Node<'_, '_>) -> SpecCellFormat {
    let bg_color = node
        .children()
        .find(|child| child.has_tag_name("patternFill"))
        .filter(|pattern| pattern.attribute("patternType") == Some("solid"))
        .and_then(|pattern| pattern.children().find(|child| child.has_tag_name("fgColor")))
        .and_then(derive_rgb_color);
    SpecCellFormat {
        bg_color,
        ..Default::default()
    }
}

fn derive_border_format(node: Node<'_, '_>) -> SpecCellFormat {
    let derive_side = |c_side: &str| {
        node.children()
            .find(|child| child.has_tag_name(c_side))
            .and_then(|child| child.attribute("style"))
            .and_then(derive_border_index)
    };
    let (left, right, top, bottom) = (
        derive_side("left"),
        derive_side("right"),
        derive_side("top"),
        derive_side("bottom"),
    );
    if left.is_some() && left == right && left == top && left == bottom {
        return SpecCellFormat {
            border: left,
            ..Default::default()
        };
    }
    SpecCellFormat {
        left,
        right,
        top,
        bottom,
        ..Default::default()
    }
}

fn derive_border_index(style: &str) -> Option<i64> {
    match style {
        "thin" => Some(1),
        "medium" => Some(2),
        "dashed" => Some(3),
        "dotted" => Some(4),
        "thick" => Some(5),
        "double" => Some(6),
        "hair" => Some(7),
        _ => None,
    }
}

fn derive_alignment_format(node: Node<'_, '_>) -> SpecCellFormat {
    let align = node
        .attribute("horizontal")
        .filter(|val| matches!(*val, "left" | "center" | "right" | "justify"))
        .map(str::to_string);
    let valign = match node.attribute("vertical") {
        Some("center") => Some("vcenter".to_string()),
        Some(val @ ("top" | "bottom")) => Some(val.to_string()),
        _ => None,
    };
    let text_wrap = node
        .attribute("wrapText")
        .filter(|val| matches!(*val, "1" | "true"))
        .map(|_| true);
    SpecCellFormat {
        align,
        valign,
        text_wrap,
        ..Default::default()
    }
}

fn derive_num_format(n_id: usize, dict_num_fmts: &HashMap<usize, String>) -> Option<String> {
    let c_builtin = match n_id {
        0 => return None,
        1 => "0",
        2 => "0.00",
        3 => "#,##0",
        4 => "#,##0.00",
        9 => "0%",
        10 => "0.00%",
        49 => "@",
        _ => return dict_num_fmts.get(&n_id).cloned(),
    };
    Some(c_builtin.to_string())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Worksheet

fn derive_sheet_styles(xml: &str, l_xf_formats: &[SpecCellFormat]) -> Result<SpecSheetStyles> {
    let doc = Document::parse(xml)?;
    let mut styles = SpecSheetStyles::default();

    for node in doc.descendants().filter(|node| node.is_element()) {
        match node.tag_name().name() {
            "c" => {
                let n_xf = derive_index(node, "s");
                if n_xf == 0 {
                    continue;
                }
                let (Some(cell_idx), Some(format)) = (
                    node.attribute("r").and_then(derive_cell_index),
                    l_xf_formats.get(n_xf),
                ) else {
                    continue;
                };
                if *format != SpecCellFormat::default() {
                    styles.dict_cell_formats.insert(cell_idx, format.clone());
                }
            }
            "col" if node.attribute("customWidth") == Some("1") => {
                let n_min = derive_index(node, "min");
                let n_max = derive_index(node, "max");
                let Some(width_xml) = node.attribute("width").and_then(|val| val.parse().ok())
                else {
                    continue;
                };
                let width = calculate_column_width_from_xml(width_xml);
                for col_idx in n_min.saturating_sub(1)..n_max {
                    styles.dict_col_widths.insert(col_idx, width);
                }
            }
            _ => {}
        }
    }
    Ok(styles)
}

/// Invert the serializer's width-to-characters conversion, to two decimals.
///
/// Widths are stored on a pixel grid, so values between pixels come back
/// rounded to the nearest pixel.
fn calculate_column_width_from_xml(width_xml: f64) -> f64 {
    let n_px = (width_xml * N_PX_DIGIT_WIDTH - N_PX_CELL_PADDING).round();
    let width = if n_px < N_PX_DIGIT_WIDTH {
        width_xml * N_PX_DIGIT_WIDTH / (N_PX_DIGIT_WIDTH + N_PX_CELL_PADDING)
    } else {
        n_px / N_PX_DIGIT_WIDTH
    };
    (width * 100.0).round() / 100.0
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
