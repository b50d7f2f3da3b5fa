use crate::domain::model::BankRecord;

pub fn render_table(records: &[BankRecord]) -> String {
    let mut lines = vec![
        format!("{:<45}{:<15}{:<15}{:<10}", "Name", "OrgNr", "Cat", "FI Inst"),
        "-".repeat(90),
    ];
    lines.extend(records.iter().map(|r| {
        format!(
            "{:<45}{:<15}{:<15}{:<10}",
            r.name,
            r.orgnr,
            r.category,
            r.fi_institutnummer.as_deref().unwrap_or("")
        )
    }));
    lines.join("\n")
}
