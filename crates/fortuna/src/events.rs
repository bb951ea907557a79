#[derive(Debug, Clone)]
pub enum AppEvent {
    Show,
    Hide,
    /// Spin to a section index, or to a weighted-random one.
    Spin(Option<usize>),
    ConfigReload,
}
