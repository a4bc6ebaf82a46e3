mod scheduler_tests;
