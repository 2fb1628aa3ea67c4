//! Event wiring between the shop state, the renderer and the remote API.
//!
//! `mount` registers one handler per UI or state event. Handlers are plain
//! synchronous closures; the two operations that need the network
//! (`load_catalog`, `submit_order`) are async methods the host awaits.

use std::rc::{Rc, Weak};

use shopfront_api::ShopApi;
use shopfront_checkout::{CheckoutForm, DraftField, OrderConfirmation};
use shopfront_events::{EventBroker, Handler, Matcher};
use shopfront_state::{BasketAction, ShopContext, ShopEvent, ShopState, names};

use crate::error::StorefrontError;
use crate::render::{
    BasketView, CardView, FormStatus, ModalContent, PreviewView, Renderer, SuccessView,
};

/// A mounted storefront.
///
/// Owns its subscriptions and removes them on drop; handlers hold strong
/// references to the shop, so leaving them registered would keep the whole
/// context alive.
pub struct Storefront<R, A> {
    context: ShopContext,
    renderer: Rc<R>,
    api: A,
    subscriptions: Vec<(Matcher, Handler<ShopEvent>)>,
}

impl<R, A> Storefront<R, A>
where
    R: Renderer + 'static,
    A: ShopApi,
{
    pub fn mount(context: ShopContext, renderer: Rc<R>, api: A) -> Self {
        let mut storefront = Self {
            context,
            renderer,
            api,
            subscriptions: Vec::new(),
        };
        storefront.wire_catalog();
        storefront.wire_basket();
        storefront.wire_checkout();
        tracing::debug!(
            subscriptions = storefront.subscriptions.len(),
            "storefront mounted"
        );
        storefront
    }

    pub fn context(&self) -> &ShopContext {
        &self.context
    }

    pub fn shop(&self) -> &Rc<ShopState> {
        &self.context.shop
    }

    pub fn broker(&self) -> &Rc<EventBroker<ShopEvent>> {
        &self.context.broker
    }

    /// Fetch the catalog and hand it to the shop.
    ///
    /// On failure the error is logged and reported; the current catalog is
    /// left as it was.
    pub async fn load_catalog(&self) -> Result<(), StorefrontError> {
        match self.api.product_list().await {
            Ok(catalog) => {
                tracing::info!(products = catalog.len(), "catalog loaded");
                self.context.shop.set_catalog(catalog);
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load catalog");
                self.renderer.report_error(&err.to_string());
                Err(err.into())
            }
        }
    }

    /// Send the current draft and basket as an order.
    ///
    /// Only one submission runs at a time; a second call while the first is
    /// in flight fails with `SubmissionInProgress` and sends nothing. On
    /// success the basket is cleared and the success modal is shown. On
    /// failure the basket and draft stay intact for a retry.
    pub async fn submit_order(&self) -> Result<OrderConfirmation, StorefrontError> {
        let order = self.context.shop.begin_submission().inspect_err(|err| {
            tracing::warn!(error = %err, "order not submitted");
        })?;

        match self.api.order_products(&order).await {
            Ok(confirmation) => {
                tracing::info!(
                    order_id = %confirmation.id,
                    total = confirmation.total,
                    "order placed"
                );
                self.context.shop.finish_submission(true);
                self.renderer.open_modal(ModalContent::Success(SuccessView {
                    total: confirmation.total,
                }));
                Ok(confirmation)
            }
            Err(err) => {
                tracing::error!(error = %err, "order submission failed");
                self.context.shop.finish_submission(false);
                self.renderer.report_error(&err.to_string());
                Err(err.into())
            }
        }
    }

    fn listen<F>(&mut self, matcher: impl Into<Matcher>, f: F)
    where
        F: Fn(&ShopEvent) + 'static,
    {
        let matcher = matcher.into();
        let handler = self.context.broker.on(matcher.clone(), f);
        self.subscriptions.push((matcher, handler));
    }

    fn handles(&self) -> (Rc<ShopState>, Rc<R>) {
        (Rc::clone(&self.context.shop), Rc::clone(&self.renderer))
    }

    fn wire_catalog(&mut self) {
        let (shop, renderer) = self.handles();
        self.listen(names::ITEMS_RENDER, move |event| {
            let ShopEvent::CatalogChanged(catalog) = event else {
                return;
            };
            renderer.render_catalog(catalog.iter().map(CardView::from).collect());
            renderer.set_basket_counter(shop.basket_len());
            renderer.render_basket(basket_view(&shop));
        });

        let (shop, renderer) = self.handles();
        self.listen(names::CARD_SELECT, move |event| {
            let ShopEvent::CardSelected(id) = event else {
                return;
            };
            match shop.product(id) {
                Some(product) => renderer.open_modal(ModalContent::Preview(PreviewView::new(
                    &product,
                    shop.in_basket(id),
                ))),
                None => tracing::warn!(product_id = %id, "selected product is not in the catalog"),
            }
        });

        let (shop, renderer) = self.handles();
        self.listen(names::CARD_TOGGLE, move |event| {
            let ShopEvent::CardToggled(id) = event else {
                return;
            };
            renderer.close_modal();
            shop.toggle_basket(id.clone(), BasketAction::toggle_for(shop.in_basket(id)));
        });
    }

    fn wire_basket(&mut self) {
        let (shop, renderer) = self.handles();
        self.listen(names::BASKET_CHANGED, move |event| {
            let ShopEvent::BasketChanged(snapshot) = event else {
                return;
            };
            renderer.set_basket_counter(snapshot.items.len());
            renderer.render_basket(BasketView::new(
                &shop.catalog(),
                &snapshot.items,
                snapshot.total,
            ));
        });

        let (shop, renderer) = self.handles();
        self.listen(names::BASKET_OPEN, move |_| {
            renderer.open_modal(ModalContent::Basket(basket_view(&shop)));
        });

        let (shop, _) = self.handles();
        self.listen(names::BASKET_REMOVE, move |event| {
            if let ShopEvent::BasketItemRemoved(id) = event {
                shop.toggle_basket(id.clone(), BasketAction::Remove);
            }
        });
    }

    fn wire_checkout(&mut self) {
        let (shop, renderer) = self.handles();
        self.listen(names::ORDER_OPEN, move |_| {
            shop.clear_draft();
            renderer.select_payment(None);
            renderer.open_modal(blank_form(CheckoutForm::Order));
        });

        let broker = Rc::downgrade(&self.context.broker);
        self.listen(names::ORDER_SUBMIT, move |_| {
            if let Some(broker) = Weak::upgrade(&broker) {
                broker.publish(ShopEvent::ContactsOpened);
            }
        });

        let (_, renderer) = self.handles();
        self.listen(names::CONTACTS_OPEN, move |_| {
            renderer.open_modal(blank_form(CheckoutForm::Contacts));
        });

        for form in [CheckoutForm::Order, CheckoutForm::Contacts] {
            let (shop, renderer) = self.handles();
            self.listen(ShopEvent::field_changes(form), move |event| {
                let ShopEvent::FieldChanged { field, value, .. } = event else {
                    return;
                };
                shop.set_draft_field(*field, value);
                if *field == DraftField::Payment {
                    renderer.select_payment(shop.draft().payment);
                }
            });
        }

        let (_, renderer) = self.handles();
        self.listen(names::FORM_ERRORS_CHANGE, move |event| {
            let ShopEvent::FormErrorsChanged(errors) = event else {
                return;
            };
            for form in [CheckoutForm::Order, CheckoutForm::Contacts] {
                renderer.update_form(form, FormStatus::of(errors, form));
            }
        });

        let (_, renderer) = self.handles();
        self.listen(names::SUCCESS_CLOSE, move |_| renderer.close_modal());
    }
}

impl<R, A> Drop for Storefront<R, A> {
    fn drop(&mut self) {
        for (matcher, handler) in self.subscriptions.drain(..) {
            self.context.broker.unsubscribe(matcher, &handler);
        }
    }
}

fn basket_view(shop: &ShopState) -> BasketView {
    BasketView::new(&shop.catalog(), &shop.basket(), shop.compute_total())
}

fn blank_form(form: CheckoutForm) -> ModalContent {
    ModalContent::Form {
        form,
        status: FormStatus::blank(),
    }
}
