mod aggregate_tests;
mod compare_tests;
