use uuid::Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;

    /// First eight hex digits of the id, used as a typed reference in the shell.
    fn short_id(&self) -> String {
        let mut short = self.id().simple().to_string();
        short.truncate(8);
        short
    }
}
