mod export_tests;
mod viewer_tests;
