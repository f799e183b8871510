//! Single source of truth for one bill-splitting session.
//!
//! The store is an explicitly constructed, owned object: create it when the
//! session starts, hand it (or a handle to it) to the step views, and call
//! [`BillStore::reset`] for "new bill". Nothing is persisted; all state lives
//! for the browser-tab-equivalent session only.
//!
//! All mutations are synchronous and run to completion before the next one.
//! The one async operation in the system, the extraction call, lives in
//! [`crate::api`]; the store only sees it through the [`ProcessingStatus`]
//! flag the caller sets around the call.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::types::{ExtractedItem, Item, ItemPatch, Member, MemberTotal, ProcessingStatus};
use crate::wizard::WizardStep;

/// The wizard's entire session state and its mutation surface.
///
/// Input validation is the calling layer's job: the store trusts that item
/// descriptions are non-empty, prices parse as positive numbers, and files
/// are images. Operations addressing unknown ids are silent no-ops, never
/// fatal (the UI only offers valid ids).
#[derive(Debug, Clone, Default)]
pub struct BillStore {
    image_path: Option<PathBuf>,
    image_url: Option<String>,
    status: ProcessingStatus,
    items: Vec<Item>,
    members: Vec<Member>,
    /// Sparse map from item id to member id. An absent key means unassigned.
    assignments: HashMap<String, String>,
    current_step: WizardStep,
    last_error: Option<String>,
}

impl BillStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- image ---

    pub fn set_image(&mut self, path: Option<PathBuf>) {
        self.image_path = path;
    }

    pub fn set_image_url(&mut self, url: Option<String>) {
        self.image_url = url;
    }

    pub fn image_path(&self) -> Option<&PathBuf> {
        self.image_path.as_ref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    // --- extraction status ---

    /// Direct status assignment; any status may replace any other. The
    /// expected flow is idle → pending → success/error, with error looping
    /// back to idle on retry, but the store does not enforce it.
    pub fn set_status(&mut self, status: ProcessingStatus) {
        self.status = status;
    }

    pub fn status(&self) -> ProcessingStatus {
        self.status
    }

    /// Record (or clear) the message shown with the retry affordance after a
    /// failed extraction.
    pub fn set_error(&mut self, message: Option<String>) {
        self.last_error = message;
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // --- items ---

    /// Bulk-replace the item collection from an extraction response. Every
    /// record gets a freshly generated id, which makes every existing
    /// assignment key dangling, so the assignment map is cleared too.
    pub fn set_items(&mut self, records: Vec<ExtractedItem>) {
        debug!(count = records.len(), "replacing item collection");
        self.items = records
            .into_iter()
            .map(|r| Item::new(r.description, r.price))
            .collect();
        self.assignments.clear();
    }

    /// Append a manually entered item. Returns the generated id. The caller
    /// has already validated the description and price.
    pub fn add_item(&mut self, description: impl Into<String>, price: f64) -> String {
        let item = Item::new(description, price);
        let id = item.id.clone();
        self.items.push(item);
        id
    }

    /// Merge the given fields into the item with that id. Unknown ids are
    /// ignored.
    pub fn update_item(&mut self, id: &str, patch: ItemPatch) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            if let Some(description) = patch.description {
                item.description = description;
            }
            if let Some(price) = patch.price {
                item.price = price;
            }
        }
    }

    /// Remove the item and prune its assignment entry, if any.
    pub fn delete_item(&mut self, id: &str) {
        self.items.retain(|i| i.id != id);
        self.assignments.remove(id);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    // --- members ---

    /// Append a member. Names are trimmed; a name that is empty after
    /// trimming is rejected and `None` is returned.
    pub fn add_member(&mut self, name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let member = Member::new(name);
        let id = member.id.clone();
        self.members.push(member);
        Some(id)
    }

    /// Remove the member and revert every assignment pointing at it to
    /// unassigned. The items themselves are preserved.
    pub fn delete_member(&mut self, id: &str) {
        self.members.retain(|m| m.id != id);
        self.assignments.retain(|_, member_id| member_id != id);
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    // --- assignments ---

    /// Set or clear the assignment for an item. Unknown item or member ids
    /// are ignored.
    pub fn assign_item(&mut self, item_id: &str, member_id: Option<&str>) {
        if self.item(item_id).is_none() {
            warn!(item_id, "assign_item: unknown item id, ignoring");
            return;
        }
        match member_id {
            Some(member_id) => {
                if !self.members.iter().any(|m| m.id == member_id) {
                    warn!(member_id, "assign_item: unknown member id, ignoring");
                    return;
                }
                self.assignments
                    .insert(item_id.to_string(), member_id.to_string());
            }
            None => {
                self.assignments.remove(item_id);
            }
        }
    }

    /// The member an item is assigned to, or `None` for unassigned.
    pub fn assignment_for(&self, item_id: &str) -> Option<&str> {
        self.assignments.get(item_id).map(String::as_str)
    }

    // --- derived queries ---

    /// Per-member totals in member insertion order. Each entry carries the
    /// assigned items in display (insertion) order. Computed fresh from the
    /// live collections on every call.
    pub fn member_totals(&self) -> Vec<MemberTotal> {
        self.members
            .iter()
            .map(|member| {
                let assigned_items: Vec<Item> = self
                    .items
                    .iter()
                    .filter(|item| self.assignment_for(&item.id) == Some(member.id.as_str()))
                    .cloned()
                    .collect();
                let total_owed = assigned_items.iter().map(|i| i.price).sum();
                MemberTotal {
                    member_id: member.id.clone(),
                    member_name: member.name.clone(),
                    total_owed,
                    assigned_items,
                }
            })
            .collect()
    }

    /// Items with no assignment entry, in display order.
    pub fn unassigned_items(&self) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| self.assignment_for(&item.id).is_none())
            .collect()
    }

    pub fn total_bill(&self) -> f64 {
        self.items.iter().map(|i| i.price).sum()
    }

    pub fn assigned_total(&self) -> f64 {
        self.items
            .iter()
            .filter(|item| self.assignment_for(&item.id).is_some())
            .map(|i| i.price)
            .sum()
    }

    pub fn unassigned_total(&self) -> f64 {
        self.unassigned_items().iter().map(|i| i.price).sum()
    }

    pub fn all_items_assigned(&self) -> bool {
        self.items
            .iter()
            .all(|item| self.assignment_for(&item.id).is_some())
    }

    // --- wizard navigation ---

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    /// Whether a step is currently reachable. Backward navigation is always
    /// allowed; forward navigation is guarded by data presence.
    pub fn can_enter(&self, step: WizardStep) -> bool {
        if step <= self.current_step {
            return true;
        }
        match step {
            WizardStep::Upload => true,
            WizardStep::Confirm => {
                self.status == ProcessingStatus::Success || !self.items.is_empty()
            }
            WizardStep::Assign => !self.items.is_empty(),
            WizardStep::Summary => !self.items.is_empty() && self.all_items_assigned(),
        }
    }

    /// Navigate to a step. Returns false (and stays put) if the step's guard
    /// rejects it.
    pub fn go_to(&mut self, step: WizardStep) -> bool {
        if self.can_enter(step) {
            self.current_step = step;
            true
        } else {
            debug!(step = ?step, "navigation blocked by step guard");
            false
        }
    }

    /// Advance to the next step if its guard allows it.
    pub fn advance(&mut self) -> bool {
        match self.current_step.next() {
            Some(next) => self.go_to(next),
            None => false,
        }
    }

    /// Go back one step. Always allowed except on the first step.
    pub fn back(&mut self) -> bool {
        match self.current_step.prev() {
            Some(prev) => self.go_to(prev),
            None => false,
        }
    }

    // --- lifecycle ---

    /// Restore the initial empty state for a new bill.
    pub fn reset(&mut self) {
        debug!("resetting bill session");
        *self = Self::default();
    }
}


#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    /// Item/member mutations exercised by the property tests.
    #[derive(Debug, Clone)]
    enum Op {
        AddItem(f64),
        DeleteItem(usize),
        AddMember(String),
        DeleteMember(usize),
        Assign(usize, usize),
        Unassign(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        // Prices in whole cents, kept small enough that f64 sums stay well
        // within a 1e-9 tolerance.
        let price = (0u32..10_000).prop_map(|cents| f64::from(cents) / 100.0);
        prop_oneof![
            price.prop_map(Op::AddItem),
            (0usize..8).prop_map(Op::DeleteItem),
            "[a-z]{1,8}".prop_map(Op::AddMember),
            (0usize..4).prop_map(Op::DeleteMember),
            ((0usize..8), (0usize..4)).prop_map(|(i, m)| Op::Assign(i, m)),
            (0usize..8).prop_map(Op::Unassign),
        ]
    }

    fn apply(store: &mut BillStore, op: Op) {
        match op {
            Op::AddItem(price) => {
                store.add_item("item", price);
            }
            Op::DeleteItem(i) => {
                if let Some(id) = store.items().get(i).map(|it| it.id.clone()) {
                    store.delete_item(&id);
                }
            }
            Op::AddMember(name) => {
                store.add_member(&name);
            }
            Op::DeleteMember(m) => {
                if let Some(id) = store.members().get(m).map(|mem| mem.id.clone()) {
                    store.delete_member(&id);
                }
            }
            Op::Assign(i, m) => {
                let item = store.items().get(i).map(|it| it.id.clone());
                let member = store.members().get(m).map(|mem| mem.id.clone());
                if let Some(item_id) = item {
                    store.assign_item(&item_id, member.as_deref());
                }
            }
            Op::Unassign(i) => {
                if let Some(id) = store.items().get(i).map(|it| it.id.clone()) {
                    store.assign_item(&id, None);
                }
            }
        }
    }

    proptest! {
        #[test]
        fn ids_stay_unique_and_ordered(ops in proptest::collection::vec(op_strategy(), 0..40)) {
            let mut store = BillStore::new();
            for op in ops {
                apply(&mut store, op);
            }

            let mut item_ids: Vec<&str> = store.items().iter().map(|i| i.id.as_str()).collect();
            item_ids.sort_unstable();
            item_ids.dedup();
            prop_assert_eq!(item_ids.len(), store.items().len());

            let mut member_ids: Vec<&str> = store.members().iter().map(|m| m.id.as_str()).collect();
            member_ids.sort_unstable();
            member_ids.dedup();
            prop_assert_eq!(member_ids.len(), store.members().len());
        }

        #[test]
        fn conservation_holds_in_every_reachable_state(
            ops in proptest::collection::vec(op_strategy(), 0..40)
        ) {
            let mut store = BillStore::new();
            for op in ops {
                apply(&mut store, op);

                let member_sum: f64 = store.member_totals().iter().map(|t| t.total_owed).sum();
                prop_assert!((member_sum - store.assigned_total()).abs() < 1e-9);
                prop_assert!(
                    (store.total_bill() - (store.assigned_total() + store.unassigned_total())).abs()
                        < 1e-9
                );
            }
        }

        #[test]
        fn assignments_never_dangle(
            ops in proptest::collection::vec(op_strategy(), 0..40)
        ) {
            let mut store = BillStore::new();
            for op in ops {
                apply(&mut store, op);

                for item_id in store.assignments.keys() {
                    prop_assert!(store.item(item_id).is_some());
                }
                for item in store.items() {
                    if let Some(member_id) = store.assignment_for(&item.id) {
                        prop_assert!(store.members().iter().any(|m| m.id == member_id));
                    }
                }
                // Every assigned item shows up in exactly one member total,
                // so a dangling value would break the counts below.
                let assigned_count = store
                    .items()
                    .iter()
                    .filter(|i| store.assignment_for(&i.id).is_some())
                    .count();
                let listed: usize = store
                    .member_totals()
                    .iter()
                    .map(|t| t.assigned_items.len())
                    .sum();
                prop_assert_eq!(assigned_count, listed);
            }
        }
    }
}
