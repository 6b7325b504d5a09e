mod fixtures;
mod bindable_tests;
