//! Derived view of the store: sort, then filter, then paginate.
//!
//! All stages are pure; [`derive`] is the only entry point the controller needs.

use crate::model::{SortConfig, SortDirection, UserRecord};
use crate::store::UserStore;

/// Rows shown per page.
pub const PAGE_SIZE: usize = 10;

/// Result of running the pipeline against the current store.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Projection {
    /// Sorted and filtered, before paging. This is what gets exported.
    pub filtered: Vec<UserRecord>,
    /// The slice visible on `current_page`.
    pub page: Vec<UserRecord>,
    pub current_page: usize,
    pub page_count: usize,
}

impl Projection {
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.page_count
    }
}

pub fn sort(records: &[UserRecord], config: SortConfig) -> Vec<UserRecord> {
    let mut out = records.to_vec();
    if let Some(key) = config.key {
        out.sort_by(|a, b| match config.direction {
            SortDirection::Asc => key.compare(a, b),
            SortDirection::Desc => key.compare(b, a),
        });
    }
    out
}

/// True when `term` occurs in any searchable field. Text fields compare
/// case-insensitively; age is matched against its decimal form as typed.
pub fn matches(record: &UserRecord, term: &str) -> bool {
    let q = term.to_lowercase();
    record.first_name.to_lowercase().contains(&q)
        || record.last_name.to_lowercase().contains(&q)
        || record.email.to_lowercase().contains(&q)
        || record.gender.as_str().contains(&q)
        || record.age.to_string().contains(term)
        || record.city.to_lowercase().contains(&q)
}

pub fn filter(records: &[UserRecord], term: &str) -> Vec<UserRecord> {
    if term.is_empty() {
        return records.to_vec();
    }
    records.iter().filter(|r| matches(r, term)).cloned().collect()
}

pub fn page_count(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// Slice for 1-indexed `page`. Pages outside the data yield an empty slice.
pub fn paginate(records: &[UserRecord], page: usize) -> &[UserRecord] {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    if page == 0 || start >= records.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(records.len());
    &records[start..end]
}

pub fn derive(store: &UserStore) -> Projection {
    let sorted = sort(store.users(), store.sort_config());
    let filtered = filter(&sorted, store.search_term());
    let page = paginate(&filtered, store.current_page()).to_vec();
    Projection {
        page_count: page_count(filtered.len()),
        current_page: store.current_page(),
        page,
        filtered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, SortKey};

    fn rec(id: u32, first: &str, age: u32, city: &str) -> UserRecord {
        UserRecord {
            id,
            first_name: first.to_string(),
            last_name: "Smith".to_string(),
            email: format!("{}@mail.com", first.to_lowercase()),
            gender: Gender::Male,
            age,
            city: city.to_string(),
        }
    }

    fn many(n: u32) -> Vec<UserRecord> {
        (1..=n).map(|i| rec(i, &format!("U{i}"), 20 + i, "Lyon")).collect()
    }

    #[test]
    fn sort_without_key_keeps_order() {
        let input = vec![rec(2, "B", 5, "x"), rec(1, "A", 3, "y")];
        assert_eq!(sort(&input, SortConfig::default()), input);
    }

    #[test]
    fn sort_desc_by_first_name() {
        let input = vec![rec(1, "Ann", 5, "x"), rec(2, "Cid", 3, "y"), rec(3, "Bea", 4, "z")];
        let out = sort(&input, SortConfig::new(SortKey::FirstName, SortDirection::Desc));
        let names: Vec<_> = out.iter().map(|r| r.first_name.as_str()).collect();
        assert_eq!(names, ["Cid", "Bea", "Ann"]);
    }

    #[test]
    fn filter_is_case_insensitive_and_checks_age_digits() {
        let input = vec![rec(1, "Ann", 30, "Rome"), rec(2, "Bo", 25, "Oslo")];
        assert_eq!(filter(&input, "ROME").len(), 1);
        assert_eq!(filter(&input, "25")[0].first_name, "Bo");
        assert_eq!(filter(&input, "").len(), 2);
        assert!(filter(&input, "zzz").is_empty());
    }

    #[test]
    fn gender_is_searchable() {
        let mut a = rec(1, "Ann", 30, "Rome");
        a.gender = Gender::Female;
        let b = rec(2, "Bo", 25, "Oslo");
        let out = filter(&[a, b], "fem");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }

    #[test]
    fn paginate_splits_into_pages_of_ten() {
        let all = many(23);
        assert_eq!(paginate(&all, 1).len(), 10);
        assert_eq!(paginate(&all, 3).len(), 3);
        assert_eq!(paginate(&all, 3)[0].id, 21);
        assert!(paginate(&all, 4).is_empty());
        assert!(paginate(&all, 0).is_empty());
        assert_eq!(page_count(23), 3);
        assert_eq!(page_count(0), 0);
    }

    #[test]
    fn derive_reports_pager_state() {
        let mut store = UserStore::new();
        store.set_users(many(15));
        let p = derive(&store);
        assert_eq!(p.page_count, 2);
        assert!(!p.has_prev());
        assert!(p.has_next());

        store.set_current_page(2);
        let p = derive(&store);
        assert!(p.has_prev());
        assert!(!p.has_next());
        assert_eq!(p.page.len(), 5);
        assert_eq!(p.filtered.len(), 15);
    }

    #[test]
    fn sort_happens_before_paging() {
        let mut store = UserStore::new();
        store.set_users(many(12));
        store.set_sort_config(SortConfig::new(SortKey::Id, SortDirection::Desc));
        let p = derive(&store);
        assert_eq!(p.page[0].id, 12);
        assert_eq!(p.page[9].id, 3);
    }
}
