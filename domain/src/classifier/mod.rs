//! Classifier subdomain
//!
//! A classifier is a trained text-categorization model hosted by the
//! remote classification service. This module holds the records the
//! service reports, the value objects used when classifying, and the
//! rule for choosing which classifier answers questions.

pub mod entities;
pub mod selection;
pub mod value_objects;
