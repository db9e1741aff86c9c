//! Data models

pub mod tour;

pub use tour::{
    days_until_label, Availability, Capacity, TourCategory, TourListing, TourStatus, Urgency,
};
