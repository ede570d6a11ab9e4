//! Enquiry relay for contact, enquiry and booking forms

mod service;


pub use service::{EnquiryReceipt, EnquiryService, EnquiryServiceConfig};
