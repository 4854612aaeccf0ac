mod tests_collection;
mod tests_config;
mod tests_handler;
