pub mod ats_issues;
pub mod bullets;
pub mod handlers;
pub mod jd_parser;
pub mod keyword_gap;
pub mod profile_import;
pub mod readability;
pub mod tailor;
pub mod tokenize;
