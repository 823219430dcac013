//! Report constants: output location, sheet names, palette, Summary text.

use pcbakit_io_xlsx::{SpecCellFormat, conf::N_BORDER_THIN};

/// Default workbook location, relative to the working directory.
pub const C_PATH_FILE_OUT_DEFAULT: &str = "output/PCBA_Import_Data.xlsx";

////////////////////////////////////////////////////////////////////////////////
// #region SheetNames

/// Research scope: focus, countries, volume range, target industries.
pub const C_SHEET_OVERVIEW: &str = "Overview";
/// Tariff codes searched for assembled boards.
pub const C_SHEET_HTS_CODES: &str = "HTS Codes";
/// Importing companies with location and HTS codes used.
pub const C_SHEET_TOP_IMPORTERS: &str = "Top Importers";
/// Overseas suppliers with country and HTS codes used.
pub const C_SHEET_TOP_SUPPLIERS: &str = "Top Suppliers";
/// Origin countries with import and export ranks.
pub const C_SHEET_IMPORT_BY_COUNTRY: &str = "Import by Country";
/// Target industries with applications and relevant HTS codes.
pub const C_SHEET_INDUSTRY_APPLICATIONS: &str = "Industry Applications";
/// Limits of the research data and how to work around them.
pub const C_SHEET_DATA_LIMITATIONS: &str = "Data Limitations";
/// Next steps for data sources and contact acquisition.
pub const C_SHEET_RECOMMENDATIONS: &str = "Recommendations";
/// Sheet the Finalizer inserts at position 0.
pub const C_SHEET_SUMMARY: &str = "Summary";

/// Data sheets in workbook order.
pub const TUP_DATA_SHEETS: [&str; 8] = [
    C_SHEET_OVERVIEW,
    C_SHEET_HTS_CODES,
    C_SHEET_TOP_IMPORTERS,
    C_SHEET_TOP_SUPPLIERS,
    C_SHEET_IMPORT_BY_COUNTRY,
    C_SHEET_INDUSTRY_APPLICATIONS,
    C_SHEET_DATA_LIMITATIONS,
    C_SHEET_RECOMMENDATIONS,
];

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Palette

/// Header row background.
pub const C_COLOR_HEADER_FILL: &str = "#366092";
/// Header row font.
pub const C_COLOR_HEADER_FONT: &str = "#FFFFFF";
/// Alternating Summary row background.
pub const C_COLOR_STRIPE_FILL: &str = "#EBF1DE";

/// Formatter header row: Arial 12 bold white on blue, centered, wrapped.
pub fn derive_header_format() -> SpecCellFormat {
    SpecCellFormat {
        font_name: Some("Arial".to_string()),
        font_size: Some(12),
        bold: Some(true),
        italic: Some(false),
        font_color: Some(C_COLOR_HEADER_FONT.to_string()),
        bg_color: Some(C_COLOR_HEADER_FILL.to_string()),
        align: Some("center".to_string()),
        valign: Some("vcenter".to_string()),
        text_wrap: Some(true),
        border: Some(N_BORDER_THIN),
        ..Default::default()
    }
}

/// Formatter body cells: alignment is replaced wholesale, so horizontal resets.
pub fn derive_body_format() -> SpecCellFormat {
    SpecCellFormat {
        align: Some("general".to_string()),
        valign: Some("vcenter".to_string()),
        text_wrap: Some(true),
        border: Some(N_BORDER_THIN),
        ..Default::default()
    }
}

/// Summary title: Arial 16 bold, centered both ways.
pub fn derive_title_format() -> SpecCellFormat {
    SpecCellFormat {
        font_name: Some("Arial".to_string()),
        font_size: Some(16),
        bold: Some(true),
        align: Some("center".to_string()),
        valign: Some("vcenter".to_string()),
        ..Default::default()
    }
}

/// Summary section heading: bold, centered.
pub fn derive_section_format() -> SpecCellFormat {
    SpecCellFormat {
        bold: Some(true),
        align: Some("center".to_string()),
        ..Default::default()
    }
}

/// Summary body text.
pub fn derive_wrap_format() -> SpecCellFormat {
    SpecCellFormat {
        text_wrap: Some(true),
        ..Default::default()
    }
}

/// Summary alternating-row fill.
pub fn derive_stripe_format() -> SpecCellFormat {
    SpecCellFormat {
        bg_color: Some(C_COLOR_STRIPE_FILL.to_string()),
        ..Default::default()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SummaryText

pub const C_SUMMARY_TITLE: &str = "PCBA IMPORT DATA SUMMARY";

pub const TUP_SUMMARY_INTRO: [&str; 4] = [
    "This spreadsheet contains import data for Printed Circuit Board Assemblies (PCBAs) from China, Vietnam, Mexico, and Canada.",
    "The data is focused on companies with annual import volumes between $1 million and $10 million in the following target industries:",
    "Medical, Oil & Gas, Metering, Green Energy, and Aerospace (excluding Automotive and Lighting sectors).",
    "Use the tabs below to navigate through different aspects of the PCBA import data.",
];

pub const C_SUMMARY_GUIDE_TITLE: &str = "SHEET NAVIGATION GUIDE";
pub const TUP_SUMMARY_GUIDE_HEADERS: [&str; 3] = ["Sheet Name", "Description", "Key Information"];

/// One guide row per data sheet: name, description, key information.
pub const TUP_SUMMARY_GUIDE_ROWS: [[&str; 3]; 8] = [
    [
        C_SHEET_OVERVIEW,
        "Research parameters and scope",
        "Product types, countries, industries, HTS codes",
    ],
    [
        C_SHEET_HTS_CODES,
        "Detailed HTS code information",
        "Code descriptions and relevance to PCBAs",
    ],
    [
        C_SHEET_TOP_IMPORTERS,
        "Leading companies importing PCBAs",
        "Company names, locations, and potential industries",
    ],
    [
        C_SHEET_TOP_SUPPLIERS,
        "Leading companies supplying PCBAs",
        "Supplier names, countries, and notes",
    ],
    [
        C_SHEET_IMPORT_BY_COUNTRY,
        "Import/export rankings by country",
        "Country rankings and target status",
    ],
    [
        C_SHEET_INDUSTRY_APPLICATIONS,
        "PCBA applications by industry",
        "Specific applications and relevant HTS codes",
    ],
    [
        C_SHEET_DATA_LIMITATIONS,
        "Limitations of publicly available data",
        "Challenges and recommendations",
    ],
    [
        C_SHEET_RECOMMENDATIONS,
        "Suggested next steps",
        "Premium data sources and contact acquisition strategies",
    ],
];

pub const C_SUMMARY_FILTER_TITLE: &str = "FILTERING INSTRUCTIONS";

pub const TUP_SUMMARY_FILTER_ROWS: [[&str; 3]; 4] = [
    [
        "1.",
        "Click on the filter button (funnel icon) in the column header",
        "Enables filtering for that column",
    ],
    [
        "2.",
        "Use the dropdown menu to select specific values",
        "Shows only rows matching your criteria",
    ],
    [
        "3.",
        "Multiple filters can be applied across different columns",
        "Narrows results based on combined criteria",
    ],
    [
        "4.",
        "Clear filters by selecting 'Clear Filter' in the dropdown",
        "Returns to showing all data",
    ],
];

pub const C_SUMMARY_NOTE: &str = "NOTE: This data is compiled from publicly available sources including Descartes Datamyne, USITC Harmonized Tariff Schedule, International Trade Administration, and ImportGenius. For more detailed and company-specific information, premium database subscriptions are recommended as outlined in the 'Recommendations' sheet.";

/// Summary column widths for A, B, C.
pub const TUP_SUMMARY_COLUMN_WIDTHS: [f64; 3] = [20.0, 30.0, 40.0];

// #endregion
////////////////////////////////////////////////////////////////////////////////
