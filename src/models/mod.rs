mod conversation;
mod inquiry;
mod property;

pub use conversation::{ConversationMessage, MessageRole};
pub use inquiry::{Inquiry, InquiryPriority, InquiryStatus, SiteVisit, VisitStatus};
pub use property::{
    Address, Furnishing, GeoPoint, NearbyAmenity, PropertyDocument, PropertyStatus, PropertyView,
    EMBEDDING_DIMENSION,
};
