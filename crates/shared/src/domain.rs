use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    /// Remaining capacity as reported by the server. Over-capacity lists yield
    /// a negative value rather than being clamped.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.participants.len() as i64
    }
}

/// Activities keyed by name, in the order the server listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(IndexMap<String, Activity>);

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, activity: Activity) -> Option<Activity> {
        self.0.insert(name.into(), activity)
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.0.iter().map(|(name, activity)| (name.as_str(), activity))
    }
}

impl FromIterator<(String, Activity)> for Roster {
    fn from_iter<T: IntoIterator<Item = (String, Activity)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoding_keeps_server_order() {
        let raw = r#"{
            "Programming Class": {"description": "d", "schedule": "s", "max_participants": 20, "participants": []},
            "Chess Club": {"description": "d", "schedule": "s", "max_participants": 12, "participants": ["michael@mergington.edu"]},
            "Art Studio": {"description": "d", "schedule": "s", "max_participants": 15, "participants": []}
        }"#;
        let roster: Roster = serde_json::from_str(raw).expect("decode roster");
        let names: Vec<&str> = roster.names().collect();
        assert_eq!(names, ["Programming Class", "Chess Club", "Art Studio"]);
    }

    #[test]
    fn spots_left_is_not_clamped() {
        let activity = Activity {
            description: String::new(),
            schedule: String::new(),
            max_participants: 1,
            participants: vec!["a@x.edu".into(), "b@x.edu".into()],
        };
        assert_eq!(activity.spots_left(), -1);
    }
}
