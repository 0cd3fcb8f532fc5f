//! Page-level view models.
//!
//! - `cart_section` - cart table, totals and checkout buttons
//! - `profile_section` - profile card, stats and the edit dialog
//! - `service_detail` - AI service detail page with detail/Q&A tabs
//! - `ai_flow` - the four-step AI pass purchase flow
//!
//! Views are headless: `render` returns plain data and actions mutate the
//! view or hand a route to a navigator.

mod ai_flow;
mod cart_section;
mod profile_section;
mod service_detail;

pub use ai_flow::{AiPassFlow, PassCard};
pub use cart_section::{CartRow, CartSection, CartSectionView, CartTotals};
pub use profile_section::{PROFILE_STATS, ProfileSection, ProfileSectionView, ProfileStats};
pub use service_detail::{
    AI_SERVICE_INDEX, DetailError, DetailTab, ServiceDetail, ServiceDetailView, TabContent,
};
