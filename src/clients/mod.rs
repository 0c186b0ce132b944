pub mod hasher_client;
