use crate::lenient;
use crate::model::RecordId;
use crate::money::DASH;
use list_framework::collate;
use serde::Deserialize;

/// A staff member (master) from `/users/employees/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Employee {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
}

impl Employee {
    /// `"Last First"`, else the email, else a dash.
    pub fn display_name(&self) -> String {
        let name = [self.last_name.trim(), self.first_name.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !name.is_empty() {
            name
        } else if !self.email.trim().is_empty() {
            self.email.trim().to_string()
        } else {
            DASH.to_string()
        }
    }
}

/// Employee display names, sorted alphabetically.
#[derive(Debug, Clone, Default)]
pub struct EmployeeDirectory {
    entries: Vec<(RecordId, String)>,
}

impl EmployeeDirectory {
    pub fn new(employees: &[Employee]) -> Self {
        let mut entries: Vec<(RecordId, String)> =
            employees.iter().map(|e| (e.id.clone(), e.display_name())).collect();
        entries.sort_by(|a, b| collate::compare(&a.1, &b.1));
        Self { entries }
    }

    pub fn entries(&self) -> &[(RecordId, String)] {
        &self.entries
    }

    pub fn name_of(&self, id: &RecordId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(eid, _)| eid == id)
            .map(|(_, name)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: u64, first: &str, last: &str, email: &str) -> Employee {
        Employee {
            id: id.into(),
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
        }
    }

    #[test]
    fn display_name_fallbacks() {
        assert_eq!(employee(1, "Айбек", "Осмонов", "").display_name(), "Осмонов Айбек");
        assert_eq!(employee(2, "Айбек", "", "").display_name(), "Айбек");
        assert_eq!(employee(3, " ", "", "a@b.kg").display_name(), "a@b.kg");
        assert_eq!(employee(4, "", "", "").display_name(), "—");
    }

    #[test]
    fn directory_is_sorted_by_collation() {
        let dir = EmployeeDirectory::new(&[
            employee(1, "", "Юсупов", ""),
            employee(2, "", "ёлкин", ""),
            employee(3, "", "Алиев", ""),
            employee(4, "", "Жумабаев", ""),
        ]);
        let names: Vec<&str> = dir.entries().iter().map(|(_, n)| n.as_str()).collect();
        assert_eq!(names, vec!["Алиев", "ёлкин", "Жумабаев", "Юсупов"]);
        assert_eq!(dir.name_of(&RecordId::from(4u64)), Some("Жумабаев"));
        assert_eq!(dir.name_of(&RecordId::from(9u64)), None);
    }
}
