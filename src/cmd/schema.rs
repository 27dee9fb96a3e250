//! Schema command CLI handler.

use crate::json_schema;

pub fn run(name: Option<String>) -> anyhow::Result<()> {
    let Some(name) = name else {
        for name in json_schema::schema_names() {
            println!("{}", name);
        }
        return Ok(());
    };

    let schema = json_schema::get_schema(&name).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown schema: {}. Valid options: {}",
            name,
            json_schema::schema_names().join(", ")
        )
    })?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
