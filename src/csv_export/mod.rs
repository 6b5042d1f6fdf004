use std::path::PathBuf;

use anyhow::Context;
use tokio::fs::DirBuilder;

use crate::page_scrapers::Field;

pub(super) const OUTPUT_PATH: &str = "listings/";


/// Serialize extracted fields into a two column CSV document.
///
/// Every cell is wrapped in double quotes and embedded quotes are doubled.
/// No other escaping is applied; since cells are always quoted, commas and
/// newlines inside values remain legal per RFC 4180.
pub(crate) fn to_csv(fields: &[Field]) -> String {
    let mut csv = String::from("key,value\n");
    for field in fields {
        csv.push_str(&format!(
            "\"{}\",\"{}\"\n",
            field.key,
            escape_quotes(&field.value)
        ));
    }
    csv
}

fn escape_quotes(value: &str) -> String {
    value.replace('"', "\"\"")
}

fn field_value<'a>(fields: &'a [Field], key: &str) -> Option<&'a str> {
    fields.iter().find(|f| f.key == key).map(|f| f.value.as_str())
}


/// Write the listing's fields as CSV under a directory named after the company and job title.
pub(super) async fn write_listing_csv(fields: &[Field]) -> anyhow::Result<PathBuf> {
    let company = field_value(fields, "company").unwrap_or("unknown-company");
    let job = field_value(fields, "job").unwrap_or("unknown-job");

    let folder_path = PathBuf::from(OUTPUT_PATH).join(format!("{company} {job}"));
    DirBuilder::new()
        .recursive(true)
        .create(&folder_path)
        .await
        .context("Failed to create a directory in listings. Do we have permissions?")?;

    let path = folder_path.join("listing.csv");
    tokio::fs::write(&path, to_csv(fields)).await?;
    Ok(path)
}
