use trackgrab_engine::{NavigateError, Navigator};

/// Writes the link to stdout instead of launching a handler.
pub struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn open(&self, link: &str) -> Result<(), NavigateError> {
        println!("{link}");
        Ok(())
    }
}
