mod revocation_repository_tests;
