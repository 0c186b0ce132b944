pub mod hasher_server;
