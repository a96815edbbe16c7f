pub enum Command {
    // Writes
    Insert {
        collection: String,
        json: String,
    },
    InsertMany {
        collection: String,
        json: String,
    },
    // Reads
    Find {
        collection: String,
        operator: String,
        key: String,
        value: String,
        limit: Option<usize>,
    },
    Count {
        collection: String,
    },
    // Introspection
    Ping,
    Operators,
    Info,
}
