mod failing_store;
