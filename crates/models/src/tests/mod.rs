mod member_tests;
mod product_tests;
