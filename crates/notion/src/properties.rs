//! Fixed mapping between card reports and Notion database properties.

use cardvault_core::mirror::CardReport;
use serde_json::{json, Value};

/// Property holding the catalog card id; used for existence checks.
pub const CARD_ID_PROPERTY: &str = "Card ID";

/// Properties the report database must have, with their Notion types.
pub const REQUIRED_PROPERTIES: &[(&str, &str)] = &[
    ("Name", "title"),
    ("Set", "rich_text"),
    ("Rarity", "rich_text"),
    ("Market Price", "number"),
    ("Method", "rich_text"),
    ("Card Image", "url"),
    ("Group ID", "rich_text"),
    ("Variant Number", "rich_text"),
    ("Created Date", "date"),
    (CARD_ID_PROPERTY, "rich_text"),
    ("Repeated", "checkbox"),
];

/// Page properties for one card report.
pub fn page_properties(report: &CardReport) -> Value {
    let record = &report.record;
    json!({
        "Name": { "title": [text(&record.name)] },
        "Set": { "rich_text": [text(&record.set_name)] },
        "Rarity": { "rich_text": [text(&record.rarity)] },
        "Market Price": { "number": record.market_price },
        "Method": { "rich_text": [text(&report.method)] },
        "Card Image": { "url": record.image_url },
        "Group ID": { "rich_text": [text(report.group_id.as_deref().unwrap_or(""))] },
        "Variant Number": { "rich_text": [text(&record.variant_number)] },
        "Created Date": { "date": { "start": report.created_at.to_rfc3339() } },
        "Card ID": { "rich_text": [text(&record.id)] },
        "Repeated": { "checkbox": report.repeated },
    })
}

/// Database query filter matching pages tagged with `card_id`.
pub fn card_id_filter(card_id: &str) -> Value {
    json!({
        "property": CARD_ID_PROPERTY,
        "rich_text": { "equals": card_id },
    })
}

/// Differences between a database schema and [`REQUIRED_PROPERTIES`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SchemaDiff {
    /// Required properties absent from the database, as `(name, type)`.
    pub missing: Vec<(&'static str, &'static str)>,
    /// Present properties with the wrong type, as `(name, expected, actual)`.
    pub mismatched: Vec<(&'static str, &'static str, String)>,
}

/// Compare a `GET /databases/{id}` payload against the required properties.
pub fn diff_schema(database: &Value) -> SchemaDiff {
    let actual = database.get("properties").and_then(Value::as_object);
    let mut diff = SchemaDiff::default();

    for &(name, expected) in REQUIRED_PROPERTIES {
        match actual.and_then(|props| props.get(name)) {
            None => diff.missing.push((name, expected)),
            Some(prop) => {
                let found = prop.get("type").and_then(Value::as_str).unwrap_or("");
                if found != expected {
                    diff.mismatched.push((name, expected, found.to_string()));
                }
            }
        }
    }

    diff
}

fn text(content: &str) -> Value {
    json!({ "text": { "content": content } })
}

#[cfg(test)]
mod tests {
    use cardvault_core::card::CardRecord;
    use cardvault_core::catalog::RawCard;

    use super::*;

    fn report(group: Option<&str>, repeated: bool) -> CardReport {
        let record = CardRecord::from_raw(
            &RawCard {
                id: "base1-4".into(),
                name: Some("Charizard".into()),
                set_name: Some("Base".into()),
                set_id: Some("base1".into()),
                rarity: Some("Rare Holo".into()),
                number: Some("4".into()),
                image_url: Some("https://images.pokemontcg.io/base1/4_hires.png".into()),
            },
            Some(350.0),
        );
        CardReport::new(record, "Manual", group, repeated)
    }

    #[test]
    fn properties_follow_fixed_mapping() {
        let props = page_properties(&report(Some("G-7"), true));

        assert_eq!(props["Name"]["title"][0]["text"]["content"], "Charizard");
        assert_eq!(props["Set"]["rich_text"][0]["text"]["content"], "Base");
        assert_eq!(props["Rarity"]["rich_text"][0]["text"]["content"], "Rare Holo");
        assert_eq!(props["Market Price"]["number"], 350.0);
        assert_eq!(props["Method"]["rich_text"][0]["text"]["content"], "Manual");
        assert_eq!(
            props["Card Image"]["url"],
            "https://images.pokemontcg.io/base1/4_hires.png"
        );
        assert_eq!(props["Group ID"]["rich_text"][0]["text"]["content"], "G-7");
        assert_eq!(props["Variant Number"]["rich_text"][0]["text"]["content"], "4");
        assert_eq!(props["Card ID"]["rich_text"][0]["text"]["content"], "base1-4");
        assert_eq!(props["Repeated"]["checkbox"], true);
        assert!(props["Created Date"]["date"]["start"].is_string());
    }

    #[test]
    fn missing_group_is_empty_text() {
        let props = page_properties(&report(None, false));
        assert_eq!(props["Group ID"]["rich_text"][0]["text"]["content"], "");
        assert_eq!(props["Repeated"]["checkbox"], false);
    }

    #[test]
    fn filter_targets_card_id_property() {
        assert_eq!(
            card_id_filter("base1-4"),
            json!({ "property": "Card ID", "rich_text": { "equals": "base1-4" } })
        );
    }

    #[test]
    fn schema_diff_reports_missing_and_mismatched() {
        let database = json!({
            "properties": {
                "Name": { "type": "title" },
                "Set": { "type": "rich_text" },
                "Rarity": { "type": "select" },
                "Market Price": { "type": "number" },
                "Method": { "type": "rich_text" },
                "Card Image": { "type": "url" },
                "Group ID": { "type": "rich_text" },
                "Variant Number": { "type": "rich_text" },
                "Created Date": { "type": "date" },
                "Card ID": { "type": "rich_text" }
            }
        });

        let diff = diff_schema(&database);
        assert_eq!(diff.missing, vec![("Repeated", "checkbox")]);
        assert_eq!(
            diff.mismatched,
            vec![("Rarity", "rich_text", "select".to_string())]
        );
    }

    #[test]
    fn empty_schema_misses_everything() {
        let diff = diff_schema(&json!({}));
        assert_eq!(diff.missing.len(), REQUIRED_PROPERTIES.len());
        assert!(diff.mismatched.is_empty());
    }
}
