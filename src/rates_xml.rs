use serde::Deserialize;

/// One currency entry of the feed, kept as raw text.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Item {
    #[serde(rename = "fullname", default)]
    pub full_name: String,
    #[serde(rename = "title", default)]
    pub short_code: String,
    #[serde(rename = "description", default)]
    pub raw_value: String,
}

/// `<rates>` document. Channel metadata other than `<date>` is ignored.
#[derive(Debug, Deserialize, PartialEq)]
pub struct Rates {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "item", default)]
    pub items: Vec<Item>,
}

pub fn parse(xml: &str) -> Result<Rates, quick_xml::DeError> {
    quick_xml::de::from_str(xml)
}
