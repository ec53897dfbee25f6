mod recognize_flow_tests;
