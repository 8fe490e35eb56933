//! Animation selection and transition planning

pub mod selector;
pub mod transition;

pub use selector::{adjust_for_personality, AnimationSelector, OverrideRule};
pub use transition::{TransitionGraph, TransitionPlanner};
