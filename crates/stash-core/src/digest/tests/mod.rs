mod tests_manifest;
