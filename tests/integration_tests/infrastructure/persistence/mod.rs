mod pg_conversation_repository_test;
