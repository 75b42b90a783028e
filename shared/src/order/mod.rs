//! Order rules
//!
//! - [`status`]: lifecycle state machine and kitchen actions
//! - [`pricing`]: subtotal / tax / total
//! - [`draft`]: the waiter's cart and submission validation
//! - [`codec`]: persisted line-item payload

pub mod codec;
pub mod draft;
pub mod pricing;
pub mod status;

// Re-exports
pub use codec::{CodecError, LineDecodePolicy, decode_lines, encode_lines};
pub use draft::{DraftError, DraftLine, OrderDraft, OrderSubmission, validate_line};
pub use pricing::{MAX_PRICE, MAX_QUANTITY, PriceBreakdown, TaxRate, price_lines};
pub use status::{KitchenAction, OrderStatus, TransitionError, TransitionPolicy};
