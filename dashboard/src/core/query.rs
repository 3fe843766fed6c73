//! Contract list query engine
//!
//! Derives the filtered, then paginated, view of the contract collection.
//! Evaluation is pure: the same inputs always produce the same page, an
//! empty page is returned when nothing matches, and collection order is the
//! only order.

use serde::{Deserialize, Serialize};

use shared::{Contract, ContractStatus, RiskLevel};

/// Fixed page size of the contract table
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Predicates applied to the collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractFilter {
    /// Case-insensitive substring matched against name OR parties
    pub search_term: String,
    pub status: Option<ContractStatus>,
    pub risk: Option<RiskLevel>,
}

impl ContractFilter {
    pub fn matches(&self, contract: &Contract) -> bool {
        self.matches_lowered(contract, &self.search_term.to_lowercase())
    }

    fn matches_lowered(&self, contract: &Contract, needle: &str) -> bool {
        let matches_search = contract.name.to_lowercase().contains(needle)
            || contract.parties.to_lowercase().contains(needle);
        let matches_status = self.status.is_none_or(|status| contract.status == status);
        let matches_risk = self.risk.is_none_or(|risk| contract.risk == risk);

        matches_search && matches_status && matches_risk
    }

    /// True when no predicate is active
    pub fn is_unrestricted(&self) -> bool {
        self.search_term.is_empty() && self.status.is_none() && self.risk.is_none()
    }
}

/// Contracts satisfying every active predicate, in collection order
pub fn filter_contracts<'a>(contracts: &'a [Contract], filter: &ContractFilter) -> Vec<&'a Contract> {
    let needle = filter.search_term.to_lowercase();
    contracts
        .iter()
        .filter(|contract| filter.matches_lowered(contract, &needle))
        .collect()
}

/// Number of pages needed for `count` items; zero when there are no items
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Clamp a requested page into `[1, max(total_pages, 1)]`
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// One page of the filtered view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractPage {
    pub items: Vec<Contract>,
    /// Page actually shown, after clamping
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    /// 1-based position of the first item shown, 0 when the page is empty
    pub first_index: usize,
    /// 1-based position of the last item shown, 0 when the page is empty
    pub last_index: usize,
}

impl ContractPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice an already filtered view into the requested page
pub fn paginate(filtered: &[&Contract], page: usize, page_size: usize) -> ContractPage {
    let page_size = page_size.max(1);
    let total_matches = filtered.len();
    let total_pages = total_pages(total_matches, page_size);
    let page = clamp_page(page, total_pages);

    let start = ((page - 1) * page_size).min(total_matches);
    let end = (start + page_size).min(total_matches);
    let items: Vec<Contract> = filtered[start..end].iter().map(|c| (*c).clone()).collect();

    let (first_index, last_index) = if items.is_empty() { (0, 0) } else { (start + 1, end) };

    ContractPage {
        items,
        page,
        page_size,
        total_pages,
        total_matches,
        first_index,
        last_index,
    }
}

/// Headline counts over the full, unfiltered collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractStats {
    pub total: usize,
    pub active: usize,
    pub renewal_due: usize,
    pub high_risk: usize,
}

impl ContractStats {
    pub fn compute(contracts: &[Contract]) -> Self {
        contracts.iter().fold(
            ContractStats {
                total: contracts.len(),
                ..Default::default()
            },
            |mut stats, contract| {
                match contract.status {
                    ContractStatus::Active => stats.active += 1,
                    ContractStatus::RenewalDue => stats.renewal_due += 1,
                    ContractStatus::Expired => {}
                }
                if contract.risk == RiskLevel::High {
                    stats.high_risk += 1;
                }
                stats
            },
        )
    }
}

/// Query inputs for one dashboard session
///
/// Any change to a filter input moves the session back to page 1; setting a
/// filter to the value it already has is not a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryEngine {
    filter: ContractFilter,
    page: usize,
    page_size: usize,
}

impl QueryEngine {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            filter: ContractFilter::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn filter(&self) -> &ContractFilter {
        &self.filter
    }

    /// Requested page; the evaluated page may be lower after clamping
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns whether the term changed
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if self.filter.search_term == term {
            return false;
        }
        self.filter.search_term = term;
        self.page = 1;
        true
    }

    pub fn set_status_filter(&mut self, status: Option<ContractStatus>) -> bool {
        if self.filter.status == status {
            return false;
        }
        self.filter.status = status;
        self.page = 1;
        true
    }

    pub fn set_risk_filter(&mut self, risk: Option<RiskLevel>) -> bool {
        if self.filter.risk == risk {
            return false;
        }
        self.filter.risk = risk;
        self.page = 1;
        true
    }

    /// Replace every filter input at once
    pub fn set_filter(&mut self, filter: ContractFilter) -> bool {
        if self.filter == filter {
            return false;
        }
        self.filter = filter;
        self.page = 1;
        true
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Advance one page, never past the last page of `contracts`
    pub fn next_page(&mut self, contracts: &[Contract]) -> usize {
        let last = self.total_pages(contracts).max(1);
        self.page = (self.page + 1).min(last);
        self.page
    }

    pub fn previous_page(&mut self) -> usize {
        self.page = self.page.saturating_sub(1).max(1);
        self.page
    }

    /// Store the clamped page so a shrunken collection cannot leave it stale
    pub fn sync_page(&mut self, contracts: &[Contract]) -> usize {
        self.page = clamp_page(self.page, self.total_pages(contracts));
        self.page
    }

    pub fn total_pages(&self, contracts: &[Contract]) -> usize {
        total_pages(filter_contracts(contracts, &self.filter).len(), self.page_size)
    }

    pub fn evaluate(&self, contracts: &[Contract]) -> ContractPage {
        let filtered = filter_contracts(contracts, &self.filter);
        paginate(&filtered, self.page, self.page_size)
    }
}

/// Batch of mutator calls; filters are applied before the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryUpdate {
    pub search_term: Option<String>,
    /// `Some(None)` clears the status filter
    pub status: Option<Option<ContractStatus>>,
    /// `Some(None)` clears the risk filter
    pub risk: Option<Option<RiskLevel>>,
    pub page: Option<usize>,
}

impl QueryUpdate {
    pub fn is_empty(&self) -> bool {
        self.search_term.is_none() && self.status.is_none() && self.risk.is_none() && self.page.is_none()
    }
}

impl QueryEngine {
    /// Apply every field present in `update`; returns whether a filter changed
    pub fn apply(&mut self, update: QueryUpdate) -> bool {
        let mut changed = false;
        if let Some(term) = update.search_term {
            changed |= self.set_search_term(term);
        }
        if let Some(status) = update.status {
            changed |= self.set_status_filter(status);
        }
        if let Some(risk) = update.risk {
            changed |= self.set_risk_filter(risk);
        }
        if let Some(page) = update.page {
            self.set_page(page);
        }
        changed
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{contract, named, scenario_contracts};

    fn every_filter() -> Vec<ContractFilter> {
        let mut filters = Vec::new();
        let terms = ["", "acme", "ACME", "globex", "agreement", "zzz"];
        let statuses = std::iter::once(None).chain(ContractStatus::ALL.into_iter().map(Some));
        for status in statuses {
            let risks = std::iter::once(None).chain(RiskLevel::ALL.into_iter().map(Some));
            for risk in risks {
                for term in terms {
                    filters.push(ContractFilter {
                        search_term: term.to_string(),
                        status,
                        risk,
                    });
                }
            }
        }
        filters
    }

    fn mixed_contracts() -> Vec<Contract> {
        vec![
            named("1", "Acme Supply Agreement", "Acme Corp & Initech", ContractStatus::Active, RiskLevel::High),
            named("2", "Office Lease", "Globex Ltd", ContractStatus::Expired, RiskLevel::Low),
            named("3", "Cloud Services", "ACME corp", ContractStatus::RenewalDue, RiskLevel::Medium),
            named("4", "Licensing Agreement", "Umbrella & Globex", ContractStatus::Active, RiskLevel::Medium),
            named("5", "NDA", "Hooli", ContractStatus::RenewalDue, RiskLevel::High),
            named("6", "Consulting", "Acme Corp", ContractStatus::Expired, RiskLevel::High),
        ]
    }

    #[test]
    fn test_filter_is_sound_and_complete() {
        let contracts = mixed_contracts();

        for filter in every_filter() {
            let filtered = filter_contracts(&contracts, &filter);
            let term = filter.search_term.to_lowercase();

            for contract in &contracts {
                let expected = (contract.name.to_lowercase().contains(&term)
                    || contract.parties.to_lowercase().contains(&term))
                    && filter.status.is_none_or(|s| s == contract.status)
                    && filter.risk.is_none_or(|r| r == contract.risk);
                let included = filtered.iter().any(|c| c.id == contract.id);
                assert_eq!(included, expected, "filter {filter:?} contract {}", contract.id);
            }
        }
    }

    #[test]
    fn test_filter_preserves_collection_order() {
        let contracts = mixed_contracts();
        let filter = ContractFilter {
            search_term: "acme".to_string(),
            ..Default::default()
        };

        let ids: Vec<&str> = filter_contracts(&contracts, &filter).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "6"]);
    }

    #[test]
    fn test_search_matches_parties_case_insensitively() {
        let contracts = mixed_contracts();
        let filter = ContractFilter {
            search_term: "GLOBEX".to_string(),
            ..Default::default()
        };

        let ids: Vec<&str> = filter_contracts(&contracts, &filter).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "4"]);
    }

    #[test]
    fn test_combined_predicates() {
        let contracts = mixed_contracts();
        let filter = ContractFilter {
            search_term: "acme".to_string(),
            status: Some(ContractStatus::Expired),
            risk: Some(RiskLevel::High),
        };

        let filtered = filter_contracts(&contracts, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "6");
    }

    #[test]
    fn test_twenty_five_contract_scenario() {
        let contracts = scenario_contracts(10, 10, 5);
        let mut engine = QueryEngine::new();

        let first = engine.evaluate(&contracts);
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_matches, 25);
        assert_eq!((first.first_index, first.last_index), (1, 10));

        engine.set_page(3);
        let third = engine.evaluate(&contracts);
        assert_eq!(third.items.len(), 5);
        assert_eq!(third.page, 3);
        assert_eq!((third.first_index, third.last_index), (21, 25));
        assert!(!third.has_next());
        assert!(third.has_previous());
    }

    #[test]
    fn test_pagination_partitions_filtered_view() {
        let contracts = scenario_contracts(13, 9, 7);

        for filter in every_filter() {
            let filtered = filter_contracts(&contracts, &filter);
            let pages = total_pages(filtered.len(), DEFAULT_PAGE_SIZE);

            let mut rebuilt = Vec::new();
            for page in 1..=pages {
                let view = paginate(&filtered, page, DEFAULT_PAGE_SIZE);
                assert!(view.items.len() <= DEFAULT_PAGE_SIZE);
                assert!(!view.items.is_empty());
                rebuilt.extend(view.items.into_iter().map(|c| c.id));
            }

            let expected: Vec<String> = filtered.iter().map(|c| c.id.clone()).collect();
            assert_eq!(rebuilt, expected, "filter {filter:?}");
        }
    }

    #[test]
    fn test_no_matches_is_single_empty_page() {
        let contracts = scenario_contracts(3, 0, 0);
        let mut engine = QueryEngine::new();
        engine.set_search_term("does not exist");

        let view = engine.evaluate(&contracts);
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.page, 1);
        assert!(view.is_empty());
        assert_eq!((view.first_index, view.last_index), (0, 0));
    }

    #[test]
    fn test_empty_collection() {
        let view = QueryEngine::new().evaluate(&[]);
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.page, 1);
        assert!(view.is_empty());
    }

    #[test]
    fn test_page_is_clamped_to_range() {
        let contracts = scenario_contracts(25, 0, 0);
        let mut engine = QueryEngine::new();

        engine.set_page(99);
        let view = engine.evaluate(&contracts);
        assert_eq!(view.page, 3);
        assert_eq!(view.items.len(), 5);

        engine.set_page(0);
        assert_eq!(engine.page(), 1);
        assert_eq!(engine.evaluate(&contracts).page, 1);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let contracts = scenario_contracts(10, 10, 5);
        let mut engine = QueryEngine::new();
        engine.set_page(3);

        // Only 5 renewal-due contracts: without the reset page 3 would be stale
        assert!(engine.set_status_filter(Some(ContractStatus::RenewalDue)));
        assert_eq!(engine.page(), 1);
        let view = engine.evaluate(&contracts);
        assert_eq!(view.items.len(), 5);

        engine.set_page(2);
        assert!(engine.set_search_term("contract"));
        assert_eq!(engine.page(), 1);

        engine.set_page(2);
        assert!(engine.set_risk_filter(Some(RiskLevel::High)));
        assert_eq!(engine.page(), 1);
    }

    #[test]
    fn test_setting_same_filter_keeps_page() {
        let mut engine = QueryEngine::new();
        engine.set_search_term("acme");
        engine.set_page(2);

        assert!(!engine.set_search_term("acme"));
        assert!(!engine.set_status_filter(None));
        assert!(!engine.set_risk_filter(None));
        assert_eq!(engine.page(), 2);
    }

    #[test]
    fn test_next_and_previous_clamp() {
        let contracts = scenario_contracts(15, 0, 0);
        let mut engine = QueryEngine::new();

        assert_eq!(engine.previous_page(), 1);
        assert_eq!(engine.next_page(&contracts), 2);
        assert_eq!(engine.next_page(&contracts), 2);
        assert_eq!(engine.previous_page(), 1);

        assert_eq!(engine.next_page(&[]), 1);
    }

    #[test]
    fn test_sync_page_after_collection_shrinks() {
        let mut engine = QueryEngine::new();
        engine.set_page(3);

        let page = engine.sync_page(&scenario_contracts(12, 0, 0));
        assert_eq!(page, 2);
        assert_eq!(engine.page(), 2);
    }

    #[test]
    fn test_apply_update_sets_filters_before_page() {
        let contracts = scenario_contracts(10, 10, 5);
        let mut engine = QueryEngine::new();
        engine.set_page(3);

        let changed = engine.apply(QueryUpdate {
            status: Some(Some(ContractStatus::Active)),
            page: Some(1),
            ..Default::default()
        });
        assert!(changed);
        assert_eq!(engine.evaluate(&contracts).items.len(), 10);

        let changed = engine.apply(QueryUpdate {
            status: Some(None),
            page: Some(3),
            ..Default::default()
        });
        assert!(changed);
        assert_eq!(engine.page(), 3);
        assert_eq!(engine.evaluate(&contracts).items.len(), 5);

        assert!(!engine.apply(QueryUpdate::default()));
        assert_eq!(engine.page(), 3);
    }

    #[test]
    fn test_stats_use_full_collection() {
        let contracts = scenario_contracts(10, 10, 5);
        let mut engine = QueryEngine::new();
        engine.set_status_filter(Some(ContractStatus::Expired));

        let stats = ContractStats::compute(&contracts);
        assert_eq!(stats.total, 25);
        assert_eq!(stats.active, 10);
        assert_eq!(stats.renewal_due, 5);
    }

    #[test]
    fn test_stats_count_high_risk() {
        let contracts = vec![
            contract("a", ContractStatus::Active, RiskLevel::High),
            contract("b", ContractStatus::Expired, RiskLevel::High),
            contract("c", ContractStatus::RenewalDue, RiskLevel::Low),
        ];

        let stats = ContractStats::compute(&contracts);
        assert_eq!(
            stats,
            ContractStats {
                total: 3,
                active: 1,
                renewal_due: 1,
                high_risk: 2
            }
        );
        assert_eq!(ContractStats::compute(&[]), ContractStats::default());
    }
}
