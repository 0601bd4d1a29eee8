mod build_tests;
mod common;
mod patch_tests;
