//! Storefront orchestration.
//!
//! Wires [`shopfront_state::ShopState`] events to a [`Renderer`] and to the
//! remote [`shopfront_api::ShopApi`]. The renderer is an opaque sink for
//! plain view data; nothing here touches a display surface.

pub mod error;
pub mod log_renderer;
pub mod render;
pub mod storefront;

pub use error::StorefrontError;
pub use log_renderer::LogRenderer;
pub use render::{
    BasketLineView, BasketView, CardView, FormStatus, ModalContent, PreviewView, Renderer,
    SuccessView,
};
pub use storefront::Storefront;
