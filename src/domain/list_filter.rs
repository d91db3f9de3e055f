//! Client-side search and sort over an in-memory record list.
//!
//! `filter_and_sort` is the pure pass every list page runs. `ListFilter`
//! wraps it with owned inputs, a debounced query and a change callback for
//! callers that are not driven by Dioxus signals.

use std::cmp::Ordering;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::debounce::Debouncer;

/// A named ordering the user can pick from the sort dropdown.
pub struct SortOption<T> {
    pub key: &'static str,
    pub label: &'static str,
    pub compare: fn(&T, &T) -> Ordering,
}

impl<T> Clone for SortOption<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SortOption<T> {}

impl<T> std::fmt::Debug for SortOption<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortOption")
            .field("key", &self.key)
            .field("label", &self.label)
            .finish()
    }
}

pub fn find_sort_option<'a, T>(
    options: &'a [SortOption<T>],
    key: &str,
) -> Option<&'a SortOption<T>> {
    if key.is_empty() {
        return None;
    }
    options.iter().find(|option| option.key == key)
}

/// Keeps the records whose search field contains `query`, then applies the
/// selected sort. Unknown sort keys leave the filtered order untouched.
pub fn filter_and_sort<T, F>(
    records: &[T],
    query: &str,
    search_field: F,
    sort_options: &[SortOption<T>],
    sort_key: &str,
) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> String,
{
    let needle = query.to_lowercase();
    let mut filtered: Vec<T> = if needle.is_empty() {
        records.to_vec()
    } else {
        records
            .iter()
            .filter(|record| search_field(record).to_lowercase().contains(&needle))
            .cloned()
            .collect()
    };

    if let Some(option) = find_sort_option(sort_options, sort_key) {
        // slice::sort_by is stable, ties keep their filtered order
        filtered.sort_by(|a, b| (option.compare)(a, b));
    }

    filtered
}

type ChangeCallback<T> = Arc<dyn Fn(Vec<T>) + Send + Sync>;

struct FilterInputs<T> {
    records: Vec<T>,
    query: String,
    pending_query: String,
    sort_key: String,
}

/// Owns the inputs of one list view and reports every recomputation
/// through `on_change`.
pub struct ListFilter<T> {
    inputs: Arc<Mutex<FilterInputs<T>>>,
    sort_options: Arc<Vec<SortOption<T>>>,
    search_field: fn(&T) -> String,
    debouncer: Debouncer,
    on_change: ChangeCallback<T>,
}

impl<T> Clone for ListFilter<T> {
    fn clone(&self) -> Self {
        Self {
            inputs: self.inputs.clone(),
            sort_options: self.sort_options.clone(),
            search_field: self.search_field,
            debouncer: self.debouncer.clone(),
            on_change: self.on_change.clone(),
        }
    }
}

impl<T> ListFilter<T>
where
    T: Clone + Send + 'static,
{
    pub fn new(
        sort_options: Vec<SortOption<T>>,
        search_field: fn(&T) -> String,
        debouncer: Debouncer,
        on_change: impl Fn(Vec<T>) + Send + Sync + 'static,
    ) -> Self {
        Self {
            inputs: Arc::new(Mutex::new(FilterInputs {
                records: Vec::new(),
                query: String::new(),
                pending_query: String::new(),
                sort_key: String::new(),
            })),
            sort_options: Arc::new(sort_options),
            search_field,
            debouncer,
            on_change: Arc::new(on_change),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FilterInputs<T>> {
        // a panicking callback cannot leave the inputs half-written
        self.inputs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The query the last recomputation used.
    pub fn applied_query(&self) -> String {
        self.lock().query.clone()
    }

    pub fn set_records(&self, records: Vec<T>) {
        self.lock().records = records;
        self.recompute();
    }

    pub fn set_sort_key(&self, sort_key: &str) {
        self.lock().sort_key = sort_key.to_string();
        self.recompute();
    }

    /// Records the query and waits out the quiet period. Only the last of
    /// several overlapping calls recomputes.
    pub fn set_query(&self, query: &str) -> impl std::future::Future<Output = bool> + Send + 'static {
        self.lock().pending_query = query.to_string();
        let ticket = self.debouncer.schedule();
        let this = self.clone();
        async move {
            if !this.debouncer.settle(ticket).await {
                return false;
            }
            {
                let mut inputs = this.lock();
                inputs.query = inputs.pending_query.clone();
            }
            this.recompute();
            true
        }
    }

    pub fn recompute(&self) {
        let result = {
            let inputs = self.lock();
            filter_and_sort(
                &inputs.records,
                &inputs.query,
                self.search_field,
                &self.sort_options,
                &inputs.sort_key,
            )
        };
        (self.on_change)(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        name: String,
        rank: u32,
    }

    fn person(name: &str, rank: u32) -> Person {
        Person {
            name: name.to_string(),
            rank,
        }
    }

    fn name_of(person: &Person) -> String {
        person.name.clone()
    }

    fn sorts() -> Vec<SortOption<Person>> {
        vec![
            SortOption {
                key: "nameAsc",
                label: "Name (A-Z)",
                compare: |a: &Person, b: &Person| crate::domain::entities::record::locale_cmp(&a.name, &b.name),
            },
            SortOption {
                key: "nameDesc",
                label: "Name (Z-A)",
                compare: |a: &Person, b: &Person| crate::domain::entities::record::locale_cmp(&b.name, &a.name),
            },
            SortOption {
                key: "rank",
                label: "Rank",
                compare: |a: &Person, b: &Person| a.rank.cmp(&b.rank),
            },
        ]
    }

    fn trio() -> Vec<Person> {
        vec![person("Alice", 1), person("bob", 2), person("Charlie", 3)]
    }

    #[test]
    fn empty_query_without_sort_is_identity() {
        let records = trio();
        let result = filter_and_sort(&records, "", name_of, &sorts(), "");
        assert_eq!(result, records);
    }

    #[test]
    fn query_matches_case_insensitive_substrings_in_input_order() {
        let result = filter_and_sort(&trio(), "a", name_of, &sorts(), "");
        assert_eq!(result, vec![person("Alice", 1), person("Charlie", 3)]);
    }

    #[test]
    fn query_keeps_exactly_the_matching_records() {
        let records = vec![
            person("Maria", 1),
            person("MARK", 2),
            person("Ann", 3),
            person("Omar", 4),
        ];
        let query = "Ar";
        let result = filter_and_sort(&records, query, name_of, &sorts(), "");

        for record in &records {
            let expected = record.name.to_lowercase().contains(&query.to_lowercase());
            assert_eq!(result.contains(record), expected, "{record:?}");
        }
    }

    #[test]
    fn name_desc_sort_orders_case_insensitively() {
        let result = filter_and_sort(&trio(), "", name_of, &sorts(), "nameDesc");
        assert_eq!(
            result,
            vec![person("Charlie", 3), person("bob", 2), person("Alice", 1)]
        );
    }

    #[test]
    fn unknown_sort_key_leaves_order_unchanged() {
        let records = vec![person("Zed", 1), person("Amy", 2)];
        let result = filter_and_sort(&records, "", name_of, &sorts(), "salary");
        assert_eq!(result, records);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let records = vec![
            person("first", 2),
            person("second", 1),
            person("third", 2),
            person("fourth", 1),
        ];
        let result = filter_and_sort(&records, "", name_of, &sorts(), "rank");
        let names: Vec<&str> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["second", "fourth", "first", "third"]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let records = vec![person("b", 1), person("a", 1), person("ab", 2)];
        let first = filter_and_sort(&records, "A", name_of, &sorts(), "rank");
        let second = filter_and_sort(&records, "A", name_of, &sorts(), "rank");
        assert_eq!(first, second);
    }

    #[test]
    fn empty_record_set_yields_empty_result() {
        let result = filter_and_sort(&[], "x", name_of, &sorts(), "nameAsc");
        assert!(result.is_empty());
    }

    fn recording_filter() -> (ListFilter<Person>, Arc<Mutex<Vec<Vec<Person>>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let filter = ListFilter::new(
            sorts(),
            name_of,
            Debouncer::new(Duration::from_millis(300)),
            move |result| sink.lock().expect("sink lock").push(result),
        );
        (filter, seen)
    }

    #[test]
    fn record_and_sort_changes_recompute_immediately() {
        let (filter, seen) = recording_filter();

        filter.set_records(trio());
        filter.set_sort_key("nameDesc");

        let seen = seen.lock().expect("sink lock");
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], trio());
        assert_eq!(seen[1][0].name, "Charlie");
    }

    #[tokio::test(start_paused = true)]
    async fn bursts_of_queries_recompute_once_with_the_last_value() {
        let (filter, seen) = recording_filter();
        filter.set_records(trio());
        let runs = Arc::new(AtomicUsize::new(0));

        let mut waits = Vec::new();
        for query in ["c", "ch", "cha", "a"] {
            waits.push(filter.set_query(query));
            tokio::time::advance(Duration::from_millis(50)).await;
        }
        for wait in waits {
            if wait.await {
                runs.fetch_add(1, AtomicOrdering::SeqCst);
            }
        }

        assert_eq!(runs.load(AtomicOrdering::SeqCst), 1);
        assert_eq!(filter.applied_query(), "a");
        let seen = seen.lock().expect("sink lock");
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1], vec![person("Alice", 1), person("Charlie", 3)]);
    }
}
