pub mod entitlement;
pub mod promo_code;
pub mod tenant;
pub mod testimonial;
pub mod wall;
