mod property_chunks;
mod snapshot_events;
