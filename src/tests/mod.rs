mod operators_tests;
