use std::cell::RefCell;
use std::rc::Rc;

use shopfront_catalog::{Catalog, Product};
use shopfront_checkout::{
    CheckoutDraft, CheckoutStage, DraftField, FinalOrder, SubmissionState, ValidationErrors,
    validate,
};
use shopfront_core::{ProductId, ShopError, ShopResult};
use shopfront_events::EventBroker;

use crate::basket::{Basket, BasketAction};
use crate::event::{BasketSnapshot, ShopEvent};

#[derive(Debug, Default)]
struct Session {
    catalog: Catalog,
    basket: Basket,
    draft: CheckoutDraft,
    errors: ValidationErrors,
    submission: SubmissionState,
}

impl Session {
    fn basket_snapshot(&self) -> BasketSnapshot {
        BasketSnapshot {
            items: self.basket.items().to_vec(),
            total: self.catalog.total_for(self.basket.items()),
        }
    }
}

/// Single authoritative holder of the storefront session.
///
/// Every mutator finishes its change and releases the inner borrow *before*
/// emitting, so handlers are free to read (or mutate) the state again while
/// the event is being delivered.
#[derive(Debug)]
pub struct ShopState {
    broker: Rc<EventBroker<ShopEvent>>,
    session: RefCell<Session>,
}

impl ShopState {
    pub fn new(broker: Rc<EventBroker<ShopEvent>>) -> Self {
        Self {
            broker,
            session: RefCell::new(Session::default()),
        }
    }

    pub fn broker(&self) -> &Rc<EventBroker<ShopEvent>> {
        &self.broker
    }

    fn emit(&self, event: ShopEvent) {
        self.broker.publish(event);
    }

    // --- catalog ---

    /// Replace the catalog and announce it on `items:render`.
    pub fn set_catalog(&self, catalog: impl Into<Catalog>) {
        let catalog = catalog.into();
        tracing::debug!(products = catalog.len(), "catalog replaced");
        self.session.borrow_mut().catalog = catalog.clone();
        self.emit(ShopEvent::CatalogChanged(catalog));
    }

    pub fn catalog(&self) -> Catalog {
        self.session.borrow().catalog.clone()
    }

    pub fn product(&self, id: &ProductId) -> Option<Product> {
        self.session.borrow().catalog.find(id).cloned()
    }

    // --- basket ---

    /// Add or remove `id`. Both directions are idempotent; `basket:changed`
    /// is emitted even when nothing changed.
    pub fn toggle_basket(&self, id: ProductId, action: BasketAction) {
        let snapshot = {
            let mut session = self.session.borrow_mut();
            let changed = session.basket.apply(id, action);
            tracing::debug!(?action, changed, size = session.basket.len(), "basket toggled");
            session.basket_snapshot()
        };
        self.emit(ShopEvent::BasketChanged(snapshot));
    }

    pub fn clear_basket(&self) {
        let snapshot = {
            let mut session = self.session.borrow_mut();
            session.basket.clear();
            session.basket_snapshot()
        };
        self.emit(ShopEvent::BasketChanged(snapshot));
    }

    pub fn basket(&self) -> Vec<ProductId> {
        self.session.borrow().basket.items().to_vec()
    }

    pub fn in_basket(&self, id: &ProductId) -> bool {
        self.session.borrow().basket.contains(id)
    }

    pub fn basket_len(&self) -> usize {
        self.session.borrow().basket.len()
    }

    /// Sum of catalog prices of the basket; unknown or unpriced ids count 0.
    pub fn compute_total(&self) -> u64 {
        let session = self.session.borrow();
        session.catalog.total_for(session.basket.items())
    }

    // --- checkout draft ---

    /// Reset every draft field. Errors are left as they are until the next
    /// validation pass.
    pub fn clear_draft(&self) {
        self.session.borrow_mut().draft.clear();
    }

    pub fn draft(&self) -> CheckoutDraft {
        self.session.borrow().draft.clone()
    }

    pub fn errors(&self) -> ValidationErrors {
        self.session.borrow().errors.clone()
    }

    pub fn stage(&self) -> CheckoutStage {
        CheckoutStage::of(&self.session.borrow().draft)
    }

    /// Store one field, then emit `order:changed`, `formErrors:change` and,
    /// if the draft passed both phases, `order:ready`.
    pub fn set_draft_field(&self, field: DraftField, value: &str) {
        let draft = {
            let mut session = self.session.borrow_mut();
            session.draft.set(field, value);
            session.draft.clone()
        };
        self.emit(ShopEvent::DraftChanged(draft.clone()));

        if self.validate() {
            self.emit(ShopEvent::DraftReady(draft));
        }
    }

    /// Validation pass: recompute the errors from scratch, store and emit
    /// them. Returns whether the draft is ready.
    pub fn validate(&self) -> bool {
        let validation = {
            let mut session = self.session.borrow_mut();
            let validation = validate(&session.draft);
            session.errors = validation.errors.clone();
            validation
        };
        tracing::debug!(stage = ?validation.stage, errors = validation.errors.len(), "draft validated");
        let valid = validation.is_valid();
        self.emit(ShopEvent::FormErrorsChanged(validation.errors));
        valid
    }

    // --- submission ---

    pub fn submission(&self) -> SubmissionState {
        self.session.borrow().submission
    }

    /// Assemble the order from the current draft and basket and mark it in
    /// flight.
    ///
    /// Fails without side effects if another submission is pending or the
    /// draft is not ready.
    pub fn begin_submission(&self) -> ShopResult<FinalOrder> {
        let order = {
            let mut session = self.session.borrow_mut();
            if session.submission.is_submitting() {
                return Err(ShopError::SubmissionInProgress);
            }
            let items = session.basket.items().to_vec();
            let total = session.catalog.total_for(&items);
            let order = FinalOrder::assemble(&session.draft, items, total)?;
            session.submission = SubmissionState::Submitting;
            order
        };
        tracing::info!(items = order.items.len(), total = order.total, "order submission started");
        self.emit(ShopEvent::SubmissionChanged(SubmissionState::Submitting));
        Ok(order)
    }

    /// Return to `Idle`; on success the basket is cleared in the same step.
    ///
    /// `submission:changed(Idle)` is emitted last, so whoever re-enables
    /// submission already sees the emptied basket.
    pub fn finish_submission(&self, succeeded: bool) {
        let cleared = {
            let mut session = self.session.borrow_mut();
            session.submission = SubmissionState::Idle;
            if succeeded {
                session.basket.clear();
                Some(session.basket_snapshot())
            } else {
                None
            }
        };
        tracing::info!(succeeded, "order submission finished");
        if let Some(snapshot) = cleared {
            self.emit(ShopEvent::BasketChanged(snapshot));
        }
        self.emit(ShopEvent::SubmissionChanged(SubmissionState::Idle));
    }
}

/// The storefront's shared context: one broker and the state that emits on
/// it. Created once at startup and handed to whoever wires the views.
#[derive(Debug, Clone)]
pub struct ShopContext {
    pub broker: Rc<EventBroker<ShopEvent>>,
    pub shop: Rc<ShopState>,
}

impl ShopContext {
    pub fn new() -> Self {
        let broker = EventBroker::shared();
        let shop = Rc::new(ShopState::new(Rc::clone(&broker)));
        Self { broker, shop }
    }
}

impl Default for ShopContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::names;
    use shopfront_checkout::CheckoutForm;
    use shopfront_events::{Event, Tap};

    type Seen = Rc<RefCell<Vec<ShopEvent>>>;

    /// Context plus a tap recording every event.
    fn recorded() -> (ShopContext, Seen) {
        let ctx = ShopContext::new();
        let seen: Seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let tap: Tap<ShopEvent> = Rc::new(move |_: &str, e: &ShopEvent| {
            sink.borrow_mut().push(e.clone())
        });
        ctx.broker.subscribe_all(tap);
        (ctx, seen)
    }

    fn names_of(seen: &Seen) -> Vec<String> {
        seen.borrow().iter().map(|e| e.event_name().into_owned()).collect()
    }

    fn pid(id: &str) -> ProductId {
        ProductId::new(id).unwrap()
    }

    fn product(id: &str, price: Option<u64>) -> Product {
        Product {
            id: pid(id),
            title: format!("title {id}"),
            description: String::new(),
            image: String::new(),
            category: "другое".to_string(),
            price,
        }
    }

    fn fill_ready(shop: &ShopState) {
        shop.set_draft_field(DraftField::Payment, "online");
        shop.set_draft_field(DraftField::Address, "Main St");
        shop.set_draft_field(DraftField::Email, "a@b.c");
        shop.set_draft_field(DraftField::Phone, "+70000000000");
    }

    #[test]
    fn set_catalog_replaces_and_emits_items_render() {
        let (ctx, seen) = recorded();
        ctx.shop.set_catalog(vec![product("a", Some(1))]);
        ctx.shop.set_catalog(vec![product("b", Some(2)), product("c", None)]);

        assert_eq!(ctx.shop.catalog().len(), 2);
        assert!(ctx.shop.product(&pid("a")).is_none());
        assert_eq!(names_of(&seen), vec![names::ITEMS_RENDER, names::ITEMS_RENDER]);
        match &seen.borrow()[1] {
            ShopEvent::CatalogChanged(catalog) => assert_eq!(catalog.len(), 2),
            other => panic!("Expected CatalogChanged, got {other:?}"),
        }
    }

    #[test]
    fn removing_absent_id_still_emits_basket_changed() {
        let (ctx, seen) = recorded();
        ctx.shop.toggle_basket(pid("a"), BasketAction::Add);
        ctx.shop.toggle_basket(pid("zzz"), BasketAction::Remove);
        ctx.shop.toggle_basket(pid("a"), BasketAction::Add);

        assert_eq!(ctx.shop.basket(), vec![pid("a")]);
        assert_eq!(
            names_of(&seen),
            vec![names::BASKET_CHANGED, names::BASKET_CHANGED, names::BASKET_CHANGED]
        );
    }

    #[test]
    fn basket_snapshot_carries_items_and_total() {
        let (ctx, seen) = recorded();
        ctx.shop.set_catalog(vec![product("a", Some(750)), product("b", Some(1450))]);
        ctx.shop.toggle_basket(pid("b"), BasketAction::Add);
        ctx.shop.toggle_basket(pid("a"), BasketAction::Add);

        match seen.borrow().last() {
            Some(ShopEvent::BasketChanged(snapshot)) => {
                assert_eq!(snapshot.items, vec![pid("b"), pid("a")]);
                assert_eq!(snapshot.total, 2200);
            }
            other => panic!("Expected BasketChanged, got {other:?}"),
        }
    }

    #[test]
    fn total_counts_unknown_ids_and_null_prices_as_zero() {
        let ctx = ShopContext::new();
        ctx.shop.set_catalog(vec![product("a", Some(750)), product("free", None)]);
        ctx.shop.toggle_basket(pid("a"), BasketAction::Add);
        ctx.shop.toggle_basket(pid("free"), BasketAction::Add);
        ctx.shop.toggle_basket(pid("gone"), BasketAction::Add);

        assert_eq!(ctx.shop.compute_total(), 750);
    }

    #[test]
    fn clear_basket_empties_and_emits() {
        let (ctx, seen) = recorded();
        ctx.shop.toggle_basket(pid("a"), BasketAction::Add);
        ctx.shop.clear_basket();

        assert_eq!(ctx.shop.basket_len(), 0);
        assert_eq!(seen.borrow().last(), Some(&ShopEvent::BasketChanged(BasketSnapshot::default())));
    }

    #[test]
    fn set_draft_field_emits_changed_then_errors() {
        let (ctx, seen) = recorded();
        ctx.shop.set_draft_field(DraftField::Address, "Main St");

        assert_eq!(names_of(&seen), vec![names::ORDER_CHANGED, names::FORM_ERRORS_CHANGE]);
        match &seen.borrow()[1] {
            ShopEvent::FormErrorsChanged(errors) => {
                assert_eq!(errors.fields().collect::<Vec<_>>(), vec![DraftField::Payment]);
            }
            other => panic!("Expected FormErrorsChanged, got {other:?}"),
        }
    }

    #[test]
    fn first_screen_complete_moves_errors_to_contacts() {
        let (ctx, _seen) = recorded();
        ctx.shop.set_draft_field(DraftField::Payment, "online");
        ctx.shop.set_draft_field(DraftField::Address, "Main St");

        let errors = ctx.shop.errors();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![DraftField::Email, DraftField::Phone]);
        assert_eq!(ctx.shop.stage(), CheckoutStage::NeedsContact);
    }

    #[test]
    fn ready_fires_once_on_the_completing_keystroke() {
        let (ctx, seen) = recorded();
        fill_ready(&ctx.shop);

        let emitted = names_of(&seen);
        let ready = emitted.iter().filter(|n| *n == names::ORDER_READY).count();
        assert_eq!(ready, 1);
        assert_eq!(emitted.last().map(String::as_str), Some(names::ORDER_READY));
        assert!(ctx.shop.errors().is_empty());

        // Every further keystroke on a ready draft emits exactly one of each.
        seen.borrow_mut().clear();
        ctx.shop.set_draft_field(DraftField::Phone, "+71111111111");
        assert_eq!(
            names_of(&seen),
            vec![names::ORDER_CHANGED, names::FORM_ERRORS_CHANGE, names::ORDER_READY]
        );
    }

    #[test]
    fn clear_draft_then_validate_returns_to_first_phase() {
        let (ctx, seen) = recorded();
        fill_ready(&ctx.shop);
        seen.borrow_mut().clear();

        ctx.shop.clear_draft();
        assert!(seen.borrow().is_empty());
        assert!(ctx.shop.errors().is_empty());

        assert!(!ctx.shop.validate());
        let errors = ctx.shop.errors();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![DraftField::Payment, DraftField::Address]);
        assert!(!errors.form_valid(CheckoutForm::Order));
    }

    #[test]
    fn handlers_may_read_state_while_an_event_is_delivered() {
        let ctx = ShopContext::new();
        let shop = Rc::clone(&ctx.shop);
        let counts = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&counts);
        ctx.broker.on(names::BASKET_CHANGED, move |_| sink.borrow_mut().push(shop.basket_len()));

        ctx.shop.toggle_basket(pid("a"), BasketAction::Add);
        ctx.shop.toggle_basket(pid("b"), BasketAction::Add);

        assert_eq!(*counts.borrow(), vec![1, 2]);
    }

    #[test]
    fn begin_submission_guards_against_double_submit() {
        let (ctx, seen) = recorded();
        ctx.shop.set_catalog(vec![product("a", Some(750))]);
        ctx.shop.toggle_basket(pid("a"), BasketAction::Add);
        fill_ready(&ctx.shop);

        let order = ctx.shop.begin_submission().unwrap();
        assert_eq!(order.items, vec![pid("a")]);
        assert_eq!(order.total, 750);
        assert!(ctx.shop.submission().is_submitting());

        assert_eq!(ctx.shop.begin_submission(), Err(ShopError::SubmissionInProgress));

        seen.borrow_mut().clear();
        ctx.shop.finish_submission(true);
        assert_eq!(ctx.shop.submission(), SubmissionState::Idle);
        assert_eq!(ctx.shop.basket_len(), 0);
        assert_eq!(names_of(&seen), vec![names::BASKET_CHANGED, names::SUBMISSION_CHANGED]);
    }

    #[test]
    fn idle_observers_see_the_cleared_basket() {
        let ctx = ShopContext::new();
        ctx.shop.set_catalog(vec![product("a", Some(750))]);
        ctx.shop.toggle_basket(pid("a"), BasketAction::Add);
        fill_ready(&ctx.shop);

        let shop = Rc::clone(&ctx.shop);
        let on_idle = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&on_idle);
        ctx.broker.on(names::SUBMISSION_CHANGED, move |event| {
            if let ShopEvent::SubmissionChanged(SubmissionState::Idle) = event {
                sink.borrow_mut().push((shop.basket_len(), shop.begin_submission()));
            }
        });

        ctx.shop.begin_submission().unwrap();
        ctx.shop.finish_submission(true);

        let on_idle = on_idle.borrow();
        assert_eq!(on_idle.len(), 1);
        assert_eq!(on_idle[0].0, 0);
        assert!(matches!(on_idle[0].1, Err(ShopError::CheckoutIncomplete(_))));
        assert_eq!(ctx.shop.submission(), SubmissionState::Idle);
    }

    #[test]
    fn failed_submission_keeps_the_basket() {
        let ctx = ShopContext::new();
        ctx.shop.toggle_basket(pid("a"), BasketAction::Add);
        fill_ready(&ctx.shop);

        ctx.shop.begin_submission().unwrap();
        ctx.shop.finish_submission(false);

        assert_eq!(ctx.shop.basket(), vec![pid("a")]);
        assert!(ctx.shop.begin_submission().is_ok());
    }

    #[test]
    fn incomplete_draft_cannot_be_submitted() {
        let ctx = ShopContext::new();
        ctx.shop.toggle_basket(pid("a"), BasketAction::Add);
        ctx.shop.set_draft_field(DraftField::Payment, "cash");

        assert!(matches!(ctx.shop.begin_submission(), Err(ShopError::CheckoutIncomplete(_))));
        assert_eq!(ctx.shop.submission(), SubmissionState::Idle);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: every toggle emits exactly one basket:changed and the
            /// basket never holds duplicates.
            #[test]
            fn every_toggle_emits_once(
                ops in proptest::collection::vec((0u8..4, any::<bool>()), 1..40)
            ) {
                let (ctx, seen) = recorded();
                for (n, add) in &ops {
                    let action = if *add { BasketAction::Add } else { BasketAction::Remove };
                    ctx.shop.toggle_basket(pid(&format!("p{n}")), action);
                }

                prop_assert_eq!(seen.borrow().len(), ops.len());
                let mut items = ctx.shop.basket();
                let len = items.len();
                items.sort();
                items.dedup();
                prop_assert_eq!(items.len(), len);
            }
        }
    }
}
