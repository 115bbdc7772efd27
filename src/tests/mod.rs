mod ephemeris_tests;
