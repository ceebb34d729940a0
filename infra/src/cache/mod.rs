//! Cache module for Redis-based OTP storage
//!
//! This module provides the Redis client with connection retry logic and the
//! Redis implementation of the `OtpStore` repository.

pub mod otp_storage;
pub mod redis_client;


pub use otp_storage::RedisOtpStore;
pub use redis_client::RedisClient;
