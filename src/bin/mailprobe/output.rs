use anyhow::{Context, Result};
use std::path::Path;

use crate::args::{Cli, Format};
use mailprobe::{DomainStatus, SmtpStatus, VerificationResult};

const RULE_WIDTH: usize = 100;
const EMAIL_WIDTH: usize = 35;
const DOMAIN_WIDTH: usize = 30;
const MX_WIDTH: usize = 15;
const SMTP_WIDTH: usize = 20;

/// Rejects formats the build cannot produce before any probing starts.
pub fn check_format(format: Format) -> Result<()> {
    match format {
        Format::Human => Ok(()),
        #[cfg(feature = "with-serde")]
        Format::Json | Format::Ndjson => Ok(()),
        #[cfg(not(feature = "with-serde"))]
        Format::Json | Format::Ndjson => {
            anyhow::bail!("format=json/ndjson nécessite la feature 'with-serde'")
        }
        #[cfg(feature = "with-csv")]
        Format::Csv => Ok(()),
        #[cfg(not(feature = "with-csv"))]
        Format::Csv => anyhow::bail!("format=csv nécessite la feature 'with-csv'"),
    }
}

pub fn write_reports(rows: &[VerificationResult], cli: &Cli) -> Result<()> {
    match cli.format {
        Format::Human => write_human(rows, cli.out.as_deref()),
        Format::Json => write_json(rows, cli.out.as_deref()),
        Format::Ndjson => write_ndjson(rows, cli.out.as_deref()),
        Format::Csv => write_csv(rows, cli.out.as_deref()),
    }
}

fn write_human(rows: &[VerificationResult], out: Option<&Path>) -> Result<()> {
    let table = render_table(rows);
    match out {
        Some(path) => write_all_atomically(path, format!("{table}\n").as_bytes()),
        None => {
            println!();
            println!("{table}");
            println!();
            Ok(())
        }
    }
}

/// Fixed-width report, one row per result, framed by `=` rules.
pub fn render_table(rows: &[VerificationResult]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push("=".repeat(RULE_WIDTH));
    lines.push(table_line("EMAIL", "DOMAIN", "MX", "SMTP"));
    lines.push("-".repeat(RULE_WIDTH));
    for row in rows {
        lines.push(table_row(row));
    }
    lines.push("=".repeat(RULE_WIDTH));
    lines.join("\n")
}

fn table_row(row: &VerificationResult) -> String {
    if !row.format_valid() {
        return table_line(&row.input, "— invalid format —", "—", "—");
    }
    table_line(
        &row.input,
        domain_mark(row.domain.status),
        &mx_short(row.domain.primary_host()),
        &smtp_mark(row),
    )
}

fn table_line(email: &str, domain: &str, mx: &str, smtp: &str) -> String {
    let line = format!(
        "{email:<EMAIL_WIDTH$} {domain:<DOMAIN_WIDTH$} {mx:<MX_WIDTH$} {smtp:<SMTP_WIDTH$}"
    );
    line.trim_end().to_string()
}

fn domain_mark(status: DomainStatus) -> &'static str {
    match status {
        DomainStatus::Valid => "✔ valid",
        DomainStatus::NotFound => "✗ not found",
        DomainStatus::NoUsableRecord => "⚠ no MX",
    }
}

fn smtp_mark(row: &VerificationResult) -> String {
    let code = row.smtp.code;
    match row.smtp.status {
        SmtpStatus::UserExists => format!("✔ exists ({code})"),
        SmtpStatus::UserNotFound => format!("✗ not found ({code})"),
        SmtpStatus::CatchAll => "⚠ catch-all".to_string(),
        SmtpStatus::Greylisted => format!("⏳ greylisted ({code})"),
        SmtpStatus::ConnectionFailed => "✗ no connection".to_string(),
        SmtpStatus::Skipped => "— skipped".to_string(),
        SmtpStatus::UnknownResponse => format!("? ({code})"),
    }
}

fn mx_short(host: Option<&str>) -> String {
    match host {
        Some(h) if h.chars().count() > MX_WIDTH => {
            let head: String = h.chars().take(MX_WIDTH - 2).collect();
            format!("{head}..")
        }
        Some(h) => h.to_string(),
        None => "—".to_string(),
    }
}

#[cfg(feature = "with-serde")]
fn write_json(rows: &[VerificationResult], out: Option<&Path>) -> Result<()> {
    let s = serde_json::to_string_pretty(rows)?;
    if let Some(path) = out {
        write_all_atomically(path, s.as_bytes())?;
    } else {
        println!("{s}");
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_: &[VerificationResult], _: Option<&Path>) -> Result<()> {
    anyhow::bail!("format=json nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-serde")]
fn write_ndjson(rows: &[VerificationResult], out: Option<&Path>) -> Result<()> {
    if let Some(path) = out {
        let mut buf = Vec::new();
        for row in rows {
            let line = serde_json::to_string(row)?;
            buf.extend_from_slice(line.as_bytes());
            buf.push(b'\n');
        }
        write_all_atomically(path, &buf)?;
    } else {
        for row in rows {
            println!("{}", serde_json::to_string(row)?);
        }
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_ndjson(_: &[VerificationResult], _: Option<&Path>) -> Result<()> {
    anyhow::bail!("format=ndjson nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-csv")]
const CSV_HEADER: [&str; 9] = [
    "input",
    "format_valid",
    "domain",
    "domain_status",
    "hosts",
    "smtp_status",
    "smtp_code",
    "smtp_host",
    "smtp_message",
];

#[cfg(feature = "with-csv")]
fn write_csv(rows: &[VerificationResult], out: Option<&Path>) -> Result<()> {
    if let Some(path) = out {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(CSV_HEADER)?;
        for row in rows {
            wtr.write_record(csv_record(row))?;
        }
        let data = wtr.into_inner()?;
        write_all_atomically(path, &data)?;
    } else {
        let mut wtr = csv::Writer::from_writer(std::io::stdout());
        wtr.write_record(CSV_HEADER)?;
        for row in rows {
            wtr.write_record(csv_record(row))?;
        }
        wtr.flush()?;
    }
    Ok(())
}

#[cfg(not(feature = "with-csv"))]
fn write_csv(_: &[VerificationResult], _: Option<&Path>) -> Result<()> {
    anyhow::bail!("format=csv nécessite la feature 'with-csv'")
}

#[cfg(feature = "with-csv")]
fn csv_record(row: &VerificationResult) -> Vec<String> {
    // invalid rows leave the DNS and SMTP columns empty
    if !row.format_valid() {
        let mut record = vec![row.input.clone(), "false".to_string()];
        record.resize(CSV_HEADER.len(), String::new());
        return record;
    }
    vec![
        row.input.clone(),
        "true".to_string(),
        row.domain.domain.clone(),
        row.domain.status.as_str().to_string(),
        row.domain.hosts.join(";"),
        row.smtp.status.as_str().to_string(),
        if row.smtp.code == 0 {
            String::new()
        } else {
            row.smtp.code.to_string()
        },
        row.smtp.host.clone().unwrap_or_default(),
        row.smtp.message.replace('\n', " "),
    ]
}

fn write_all_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);
    {
        let mut f = std::fs::File::create(&tmp)
            .with_context(|| format!("création de {}", tmp.display()))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path)
        .with_context(|| format!("renommage {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailprobe::{DomainResolution, SmtpProbeResult, parse_email};

    fn row(input: &str, domain: DomainResolution, smtp: SmtpProbeResult) -> VerificationResult {
        VerificationResult {
            input: input.to_string(),
            address: parse_email(input).ok(),
            domain,
            smtp,
        }
    }

    fn answered(status: SmtpStatus, code: u16, host: &str) -> SmtpProbeResult {
        SmtpProbeResult {
            status,
            code,
            message: String::new(),
            host: Some(host.to_string()),
            hosts_tried: vec![host.to_string()],
        }
    }

    fn sample_rows() -> Vec<VerificationResult> {
        let example = || DomainResolution::valid("example.com", vec!["mx.example.com".into()]);
        vec![
            row("broken", DomainResolution::default(), SmtpProbeResult::skipped()),
            row(
                "alice@example.com",
                example(),
                answered(SmtpStatus::UserExists, 250, "mx.example.com"),
            ),
            row(
                "bob@longdomain-example.com",
                DomainResolution::valid(
                    "longdomain-example.com",
                    vec!["aspmx.l.google.com".into()],
                ),
                answered(SmtpStatus::Greylisted, 451, "aspmx.l.google.com"),
            ),
            row(
                "carol@gone.test",
                DomainResolution::not_found("gone.test"),
                SmtpProbeResult::skipped(),
            ),
            row(
                "dave@dark.test",
                DomainResolution::no_usable_record("dark.test"),
                SmtpProbeResult::skipped(),
            ),
            row(
                "erin@example.com",
                example(),
                SmtpProbeResult::connection_failed(vec!["mx.example.com".into()]),
            ),
        ]
    }

    #[test]
    fn human_table() {
        insta::assert_snapshot!(render_table(&sample_rows()), @r"
        ====================================================================================================
        EMAIL                               DOMAIN                         MX              SMTP
        ----------------------------------------------------------------------------------------------------
        broken                              — invalid format —             —               —
        alice@example.com                   ✔ valid                        mx.example.com  ✔ exists (250)
        bob@longdomain-example.com          ✔ valid                        aspmx.l.googl.. ⏳ greylisted (451)
        carol@gone.test                     ✗ not found                    —               — skipped
        dave@dark.test                      ⚠ no MX                        —               — skipped
        erin@example.com                    ✔ valid                        mx.example.com  ✗ no connection
        ====================================================================================================
        ");
    }

    #[test]
    fn table_lines_have_no_trailing_whitespace() {
        let table = render_table(&sample_rows());
        assert!(table.lines().all(|l| l == l.trim_end()));
    }

    #[test]
    fn mx_column_truncation() {
        assert_eq!(mx_short(Some("exactly15chars.")), "exactly15chars.");
        assert_eq!(mx_short(Some("sixteen-chars.io")), "sixteen-chars..");
        assert_eq!(mx_short(None), "—");
    }

    #[test]
    fn unknown_and_catch_all_marks() {
        let mut r = row(
            "x@example.com",
            DomainResolution::valid("example.com", vec!["mx.example.com".into()]),
            answered(SmtpStatus::UnknownResponse, 252, "mx.example.com"),
        );
        assert_eq!(smtp_mark(&r), "? (252)");
        r.smtp.status = SmtpStatus::CatchAll;
        assert_eq!(smtp_mark(&r), "⚠ catch-all");
    }

    #[test]
    fn atomic_write_replaces_target() {
        let path =
            std::env::temp_dir().join(format!("mailprobe-report-{}.txt", std::process::id()));
        std::fs::write(&path, "old").unwrap();
        write_all_atomically(&path, b"new").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(content, "new");
    }
}
