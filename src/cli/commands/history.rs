use crate::config::Config;
use crate::db::Store;
use crate::models::QueryStatus;

pub async fn cmd_history(config: &Config, limit: u64, status: Option<&str>) -> anyhow::Result<()> {
    let status = status
        .map(|s| {
            QueryStatus::parse(s)
                .ok_or_else(|| anyhow::anyhow!("Unknown status '{s}'. Use success, error or failed"))
        })
        .transpose()?;

    let store = Store::new(&config.general.database_path).await?;
    let entries = store
        .recent_queries(limit, status.map(QueryStatus::as_str))
        .await?;

    if entries.is_empty() {
        println!("No lookups recorded.");
        return Ok(());
    }

    println!("Recent Lookups (last {}):", entries.len());
    println!("{:-<70}", "");

    for entry in entries {
        println!(
            "• #{} {}/{}/{} [{}]",
            entry.id, entry.case_type, entry.case_number, entry.filing_year, entry.status
        );
        println!("  {}", entry.query_time);
    }

    Ok(())
}
