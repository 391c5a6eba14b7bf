#[derive(Debug, Clone)]
pub enum Progress {
    StageStart { name: &'static str },
    StageFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_is_silent() {
        ProgressReporter::new().report(Progress::StageFinish);
    }

    #[test]
    fn reporter_forwards_events_in_order() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            let label = match event {
                Progress::StageStart { name } => format!("start:{}", name),
                Progress::StageFinish => "finish".to_string(),
                Progress::Message(msg) => format!("msg:{}", msg),
            };
            seen.lock().unwrap().push(label);
        }));

        reporter.report(Progress::StageStart { name: "Validation" });
        reporter.report(Progress::Message("ok".into()));
        reporter.report(Progress::StageFinish);
        drop(reporter);

        assert_eq!(
            seen.into_inner().unwrap(),
            vec!["start:Validation", "msg:ok", "finish"]
        );
    }
}
