use serde::{ser::SerializeMap, Serialize, Serializer};

/// Promotional lines per source, kept in source declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealSet {
    entries: Vec<(String, Vec<String>)>,
}

impl DealSet {
    pub fn new() -> Self {
        DealSet::default()
    }

    /// Sources that produced nothing get their one-line fallback instead.
    pub fn insert_or_fallback(&mut self, key: &str, deals: Vec<String>, fallback: &str) {
        let deals = match deals.is_empty() {
            true => vec![fallback.to_string()],
            false => deals,
        };

        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = deals,
            None => self.entries.push((key.to_string(), deals)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, deals)| deals.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for DealSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, deals) in self.entries.iter() {
            map.serialize_entry(key, deals)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::DealSet;

    #[test]
    fn empty_deals_are_replaced_by_fallback() {
        let mut set = DealSet::new();
        set.insert_or_fallback("rei", vec![], "Visit REI");

        assert_eq!(set.get("rei").unwrap(), ["Visit REI".to_string()]);
    }

    #[test]
    fn serializes_in_insertion_order() {
        let mut set = DealSet::new();
        set.insert_or_fallback("zeta", vec!["Save 10% on stoves".to_string()], "z");
        set.insert_or_fallback("alpha", vec![], "a fallback");

        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(
            json,
            r#"{"zeta":["Save 10% on stoves"],"alpha":["a fallback"]}"#
        );
    }

    #[test]
    fn reinserting_a_key_replaces_it_in_place() {
        let mut set = DealSet::new();
        set.insert_or_fallback("a", vec![], "fa");
        set.insert_or_fallback("b", vec![], "fb");
        set.insert_or_fallback("a", vec!["Clearance tents".to_string()], "fa");

        let keys: Vec<&str> = set.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(set.get("a").unwrap(), ["Clearance tents".to_string()]);
    }
}
