//! Builds a small sales report with a cover page.
//!
//! Run with `cargo run --example sales_report`; writes `sales_report.pdf`
//! to the current directory.

use qrydoc::{
    Cover, CoverText, InMemoryTable, PresetKind, ReportGenerator, SectionConfig, SectionKind,
    TemplateBuilder,
};

fn main() -> Result<(), qrydoc::ReportError> {
    env_logger::init();

    let template = TemplateBuilder::from_preset(PresetKind::Retail)
        .with_sections(vec![
            SectionConfig::new(SectionKind::Cover),
            SectionConfig::new(SectionKind::Summary),
            SectionConfig::new(SectionKind::Data),
            SectionConfig::custom("Figures are preliminary and unaudited."),
        ])
        .build();

    let cover = Cover::builder()
        .set_title("Quarterly Sales Report")
        .set_subtitle("Q4 2025")
        .set_date(chrono::NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date"))
        .set_author("Sales Operations")
        .add_custom_text(CoverText::new("INTERNAL").at(297.0, 120.0))
        .build();

    let table = InMemoryTable::with_rows(
        vec!["region".into(), "units".into(), "revenue".into()],
        vec![
            vec!["North".into(), "1 240".into(), "$310,000".into()],
            vec!["South".into(), "980".into(), "$245,000".into()],
            vec!["East".into(), "1 410".into(), "$352,500".into()],
            vec!["West".into(), "1 730".into(), "$432,500".into()],
        ],
    );

    ReportGenerator::new("sales_report.pdf", template).build_with_cover(
        &cover,
        "Quarterly Sales",
        Some("Unit sales grew 9% quarter over quarter, led by the West region."),
        Some(&table),
    )?;

    println!("wrote sales_report.pdf");
    Ok(())
}
