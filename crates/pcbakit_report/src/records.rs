//! Static PCBA import research record tables, one per data sheet.

use polars::df;

use crate::conf::{
    C_SHEET_DATA_LIMITATIONS, C_SHEET_HTS_CODES, C_SHEET_IMPORT_BY_COUNTRY,
    C_SHEET_INDUSTRY_APPLICATIONS, C_SHEET_OVERVIEW, C_SHEET_RECOMMENDATIONS,
    C_SHEET_TOP_IMPORTERS, C_SHEET_TOP_SUPPLIERS,
};
use crate::error::Result;
use crate::spec::SpecRecordTable;

/// All eight record tables in workbook order.
pub fn derive_record_tables() -> Result<Vec<SpecRecordTable>> {
    Ok(vec![
        derive_overview()?,
        derive_hts_codes()?,
        derive_top_importers()?,
        derive_top_suppliers()?,
        derive_import_by_country()?,
        derive_industry_applications()?,
        derive_data_limitations()?,
        derive_recommendations()?,
    ])
}

fn derive_overview() -> Result<SpecRecordTable> {
    let df = df!(
        "Category" => [
            "Research Focus",
            "Product Type",
            "Import Countries",
            "Annual Import Volume Range",
            "Target Industries",
            "Excluded Industries",
            "Ideal Contact Roles",
            "Primary HTS Codes",
            "Data Sources Used"
        ],
        "Details" => [
            "PCBA Import Data Research",
            "Printed Circuit Board Assemblies (PCBAs), not bare boards (PCBs)",
            "China, Vietnam, Mexico, Canada",
            "$1 million – $10 million",
            "Medical, Oil & Gas, Metering, Green Energy, Aerospace",
            "Automotive, Lighting",
            "Buyer, Supply Chain Manager/Director",
            "8534.XX.XXXX, 8529.90.5500, 8549.XX.XXXX, 8548.XX.XXXX, 8517.62.XXXX, 8532.XX.XXXX, 8471.90.XXXX",
            "Descartes Datamyne, USITC Harmonized Tariff Schedule, International Trade Administration, ImportGenius"
        ]
    )?;
    Ok(SpecRecordTable::new(C_SHEET_OVERVIEW, df))
}

fn derive_hts_codes() -> Result<SpecRecordTable> {
    let df = df!(
        "HTS Code" => [
            "8534.00.00.20",
            "8534.00.00.40",
            "8534.00.00.50",
            "8534.00.00.70",
            "8534.00.00.80",
            "8534.00.00.85",
            "8534.00.00.95",
            "8529.90.5500",
            "8517.62.00.10",
            "8517.62.00.20",
            "8517.62.00.90",
            "8532.10.00.00",
            "8532.21.00.20",
            "8532.21.00.40",
            "8532.21.00.50",
            "8532.21.00.80",
            "8532.22.00",
            "8548.00.00.00",
            "8549.11",
            "8471.90.00.00"
        ],
        "Description" => [
            "Printed Circuits - With 3 or more layers of conducting materials",
            "Printed Circuits - Other",
            "Printed Circuits - Having a base wholly of impregnated paper",
            "Printed Circuits - Other",
            "Printed Circuits - Flexible type",
            "Printed Circuits - Other, having a ceramic base",
            "Printed Circuits - Other",
            "Flat panel screen assemblies for various display apparatus",
            "Modems used with data processing machines",
            "Switching and routing apparatus",
            "Other machines for reception, conversion and transmission",
            "Fixed capacitors for 50/60 Hz circuits",
            "Tantalum capacitors - Metal case",
            "Tantalum capacitors - Dipped",
            "Tantalum capacitors - Designed for surface mounting (SMD)",
            "Tantalum capacitors - Other",
            "Aluminum electrolytic capacitors",
            "Electrical parts of machinery or apparatus, not specified elsewhere",
            "Electrical and electronic waste and scrap",
            "Other units of automatic data processing machines"
        ],
        "Relevance to PCBAs" => [
            "Primary HTS code for PCBAs with multiple layers",
            "Primary HTS code for simpler PCBAs",
            "PCBAs with paper-based substrate",
            "Other types of PCBAs",
            "Flexible PCBAs",
            "PCBAs with ceramic substrate",
            "Other PCBA types",
            "PCBAs for display technologies",
            "PCBAs for modem applications",
            "PCBAs for networking equipment",
            "PCBAs for other telecommunications equipment",
            "PCBAs with specific capacitor types",
            "PCBAs with tantalum capacitors in metal cases",
            "PCBAs with dipped tantalum capacitors",
            "PCBAs with surface-mount tantalum capacitors",
            "PCBAs with other tantalum capacitors",
            "PCBAs with aluminum electrolytic capacitors",
            "PCBAs classified as electrical parts",
            "PCBAs being imported for recycling/refurbishment",
            "PCBAs for data processing equipment"
        ]
    )?;
    Ok(SpecRecordTable::new(C_SHEET_HTS_CODES, df))
}

fn derive_top_importers() -> Result<SpecRecordTable> {
    let df = df!(
        "Company Name" => [
            "Continental Automotive Systems Inc",
            "Robert Bosch Corporation",
            "Samsung Electronics America Inc",
            "Panasonic Corporation",
            "Sumitronics Usa Inc",
            "Other US Importers (3134 total)"
        ],
        "Location" => [
            "Arizona",
            "Texas",
            "California",
            "Texas",
            "California",
            "Various US locations"
        ],
        "HTS Codes Used" => [
            "8534.XX.XXXX",
            "8534.XX.XXXX",
            "8534.XX.XXXX, 8529.90.5500",
            "8534.XX.XXXX, 8517.62.XXXX",
            "8534.XX.XXXX",
            "Various"
        ],
        "Potential Industry" => [
            "Automotive (excluded from target)",
            "Multiple industries including Oil & Gas",
            "Multiple industries including Medical",
            "Multiple industries including Medical, Green Energy",
            "Multiple industries",
            "Various"
        ],
        "Notes" => [
            "Major importer but primarily automotive sector",
            "Diversified technology company with presence in target industries",
            "Electronics manufacturer with healthcare division",
            "Diversified electronics with medical and energy divisions",
            "Electronics manufacturing services provider",
            "According to Descartes Datamyne, 3139 US importers used HTS 8534 in the last 12 months"
        ]
    )?;
    Ok(SpecRecordTable::new(C_SHEET_TOP_IMPORTERS, df))
}

fn derive_top_suppliers() -> Result<SpecRecordTable> {
    let df = df!(
        "Company Name" => [
            "Suntan Technology Company Limited",
            "Wang Shuangjian",
            "Chin Poon Industrial Co Ltd",
            "Meiko Elec HK Co Ltd",
            "HT Circuits Ltd",
            "Other Suppliers (2856 total)"
        ],
        "Country" => [
            "China",
            "China",
            "Taiwan",
            "Hong Kong/China",
            "China",
            "Various"
        ],
        "HTS Codes Used" => [
            "8534.XX.XXXX",
            "8534.XX.XXXX",
            "8534.XX.XXXX",
            "8534.XX.XXXX",
            "8534.XX.XXXX",
            "Various"
        ],
        "Notes" => [
            "Major supplier of electronic components including PCBAs",
            "Individual supplier or trading company",
            "PCB manufacturer with PCBA capabilities",
            "PCB and PCBA manufacturer",
            "Circuit board manufacturer",
            "According to Descartes Datamyne, 2861 suppliers to the US used HTS 8534 in the last 12 months"
        ]
    )?;
    Ok(SpecRecordTable::new(C_SHEET_TOP_SUPPLIERS, df))
}

fn derive_import_by_country() -> Result<SpecRecordTable> {
    // Ranks mix integers and text; integer-looking values are written as numbers.
    let df = df!(
        "Country" => [
            "China",
            "Taiwan",
            "Japan",
            "Canada",
            "Korea, South",
            "Vietnam",
            "Mexico",
            "Other Countries"
        ],
        "Import Rank" => ["1", "2", "3", "4", "5", "Not in top 5", "Not in top 5", "-"],
        "Export Rank" => ["4", "Not in top 5", "5", "3", "Not in top 5", "Not in top 5", "1", "-"],
        "Target Country" => ["Yes", "No", "No", "Yes", "No", "Yes", "Yes", "No"],
        "Notes" => [
            "Primary source of PCBA imports",
            "Major electronics manufacturing hub",
            "High-tech electronics manufacturing",
            "Target country with significant trade",
            "Advanced electronics manufacturing",
            "Growing electronics manufacturing base",
            "Major destination for US exports",
            "Various other countries with smaller import/export volumes"
        ]
    )?;
    Ok(SpecRecordTable::new(C_SHEET_IMPORT_BY_COUNTRY, df)
        .with_integer_cols(&["Import Rank", "Export Rank"]))
}

fn derive_industry_applications() -> Result<SpecRecordTable> {
    let df = df!(
        "Target Industry" => [
            "Medical",
            "Medical",
            "Medical",
            "Oil & Gas",
            "Oil & Gas",
            "Oil & Gas",
            "Metering",
            "Metering",
            "Metering",
            "Green Energy",
            "Green Energy",
            "Green Energy",
            "Aerospace",
            "Aerospace",
            "Aerospace"
        ],
        "Application" => [
            "Diagnostic imaging displays",
            "Patient monitoring systems",
            "Medical device control systems",
            "Field monitoring equipment",
            "Control systems for extraction equipment",
            "Sensing and measurement devices",
            "Smart meters",
            "Utility monitoring systems",
            "Precision measurement devices",
            "Solar inverter control systems",
            "Wind turbine monitoring",
            "Energy storage management",
            "Navigation systems",
            "Flight control systems",
            "Communication equipment"
        ],
        "Relevant HTS Codes" => [
            "8529.90.5500",
            "8517.62.XXXX",
            "8534.XX.XXXX",
            "8517.62.XXXX",
            "8534.XX.XXXX",
            "8532.XX.XXXX",
            "8517.62.XXXX",
            "8534.XX.XXXX",
            "8532.XX.XXXX",
            "8534.XX.XXXX",
            "8517.62.XXXX",
            "8532.XX.XXXX",
            "8517.62.XXXX",
            "8534.XX.XXXX",
            "8517.62.XXXX"
        ],
        "Notes" => [
            "Used in medical imaging equipment",
            "Used in vital signs monitors and medical telemetry",
            "Used in various medical devices and equipment",
            "Used in remote monitoring systems for oil fields",
            "Used in drilling and extraction equipment",
            "Used in precision measurement for oil & gas operations",
            "Used in advanced utility metering systems",
            "Used in grid monitoring and management",
            "Used in flow measurement and other precision applications",
            "Used in solar power conversion systems",
            "Used in wind turbine control and monitoring",
            "Used in battery management systems",
            "Used in aircraft and spacecraft navigation",
            "Used in aircraft control systems",
            "Used in aerospace communication systems"
        ]
    )?;
    Ok(SpecRecordTable::new(C_SHEET_INDUSTRY_APPLICATIONS, df))
}

fn derive_data_limitations() -> Result<SpecRecordTable> {
    let df = df!(
        "Limitation Category" => [
            "Volume-Specific Filtering",
            "Industry Classification",
            "Contact Information",
            "Data Recency",
            "Company Size Information"
        ],
        "Description" => [
            "Cannot filter by specific import volume ranges ($1M-$10M) without premium database access",
            "HTS codes do not distinguish between industries (e.g., medical vs. automotive)",
            "Contact information for specific roles (Buyers, Supply Chain Managers) not available in public data",
            "Most recent complete data available is from 2020 in public sources",
            "Company size and annual revenue information limited in public data"
        ],
        "Recommendation" => [
            "Purchase premium access to import/export databases like Descartes Datamyne or ImportGenius",
            "Use data enrichment services to add industry classifications to import data",
            "Use specialized B2B contact databases like ZoomInfo or D&B Hoovers",
            "Request custom data extract with most recent data from premium providers",
            "Combine import data with company information from business databases"
        ]
    )?;
    Ok(SpecRecordTable::new(C_SHEET_DATA_LIMITATIONS, df))
}

fn derive_recommendations() -> Result<SpecRecordTable> {
    let df = df!(
        "Recommendation Category" => [
            "Data Sources",
            "Data Sources",
            "Data Sources",
            "Contact Acquisition",
            "Contact Acquisition",
            "Contact Acquisition",
            "Industry Filtering",
            "Volume Filtering"
        ],
        "Recommendation" => [
            "Purchase premium access to Descartes Datamyne",
            "Purchase premium access to ImportGenius",
            "Purchase premium access to Panjiva (S&P Global)",
            "Use ZoomInfo for targeted contact information",
            "Use LinkedIn Sales Navigator for role-specific contacts",
            "Contact industry associations in target sectors",
            "Use data enrichment services to add industry classifications",
            "Request custom data extract with volume filters from premium providers"
        ],
        "Details" => [
            "Full subscription provides detailed company profiles and some contact information",
            "Premium access includes contact details for importers",
            "Offers comprehensive company profiles with contact information",
            "Specializes in B2B contact information including procurement roles",
            "Allows targeted searches for specific job titles and companies",
            "Industry associations often maintain member directories with contacts",
            "Third-party services can enrich import data with industry classifications",
            "Custom data requests can filter by specific import volume ranges"
        ]
    )?;
    Ok(SpecRecordTable::new(C_SHEET_RECOMMENDATIONS, df))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::derive_record_tables;
    use crate::conf::TUP_DATA_SHEETS;

    #[test]
    fn record_tables_follow_sheet_order_and_sizes() {
        let l_tables = derive_record_tables().expect("records");
        let l_names: Vec<&str> = l_tables.iter().map(|tbl| tbl.sheet_name).collect();
        assert_eq!(l_names, TUP_DATA_SHEETS.to_vec());

        let l_heights: Vec<usize> = l_tables.iter().map(|tbl| tbl.height()).collect();
        assert_eq!(l_heights, vec![9, 20, 6, 6, 8, 15, 5, 8]);
    }

    #[test]
    fn only_country_ranks_are_integer_columns() {
        let l_tables = derive_record_tables().expect("records");
        for tbl in &l_tables {
            if tbl.sheet_name == "Import by Country" {
                assert_eq!(tbl.cols_integer, vec!["Import Rank", "Export Rank"]);
            } else {
                assert!(tbl.cols_integer.is_empty(), "{}", tbl.sheet_name);
            }
        }
    }
}
