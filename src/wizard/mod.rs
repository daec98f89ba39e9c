//! Listing wizard: session model, step validators and the controller that
//! drives them.

mod controller;
mod session;
pub mod steps;

pub use controller::{AddPhotosReport, WizardController, MSG_UPLOAD_INTERRUPTED};
pub use session::{
    split_list, BasicInfo, Category, Dimensions, FieldErrors, PhotoItem, PhotoStatus, SeoData,
    WizardSession, WizardStep,
};
