pub mod order_cache;
