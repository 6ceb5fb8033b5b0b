use serde::Serialize;

/// One sample of a curve; serialises as `{"x": .., "y": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point2D {
    x: f64,
    y: f64
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_as_named_fields() {
        let json = serde_json::to_string(&Point2D::new(0.5, -1.25)).unwrap();
        assert_eq!(json, r#"{"x":0.5,"y":-1.25}"#);
    }
}
