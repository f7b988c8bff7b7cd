mod env_config;
mod topologies;
