mod property_case;
mod property_pool;
