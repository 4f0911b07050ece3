use pyo3::{exceptions::PyValueError, prelude::*};

use crate::{Error, Mode};

fn to_py(e: Error) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn get_mode(mode: &str) -> PyResult<Mode> {
    match mode {
        "min" => Ok(Mode::Min),
        "max" => Ok(Mode::Max),
        "both" => Ok(Mode::Both),
        _ => Err(PyValueError::new_err(format!(
            "Invalid mode {mode}. Use one of min, max, both."
        ))),
    }
}

#[pyclass]
struct MovingMinMax(crate::MovingMinMax<f64>);

#[pymethods]
impl MovingMinMax {
    #[new]
    #[pyo3(signature = (w, mode = "both"))]
    fn new(w: usize, mode: &str) -> PyResult<Self> {
        crate::MovingMinMax::new(w, get_mode(mode)?)
            .map(Self)
            .map_err(to_py)
    }

    fn update(&mut self, value: f64) {
        self.0.update(value);
    }

    fn min(&self) -> PyResult<f64> {
        self.0.min().map_err(to_py)
    }

    fn max(&self) -> PyResult<f64> {
        self.0.max().map_err(to_py)
    }

    fn reset(&mut self) {
        self.0.reset();
    }
}

#[pyclass]
struct MovingMean(crate::MovingMean<f64>);

#[pymethods]
impl MovingMean {
    #[new]
    fn new(w: usize) -> PyResult<Self> {
        crate::MovingMean::new(w).map(Self).map_err(to_py)
    }

    fn update(&mut self, value: f64) {
        self.0.update(value);
    }

    fn mean(&self) -> PyResult<f64> {
        self.0.mean().map_err(to_py)
    }
}

#[pyfunction]
fn moving_min_max_offline(values: Vec<f64>, w: usize) -> PyResult<(Vec<f64>, Vec<f64>)> {
    crate::offline::moving_min_max(&values, w).map_err(to_py)
}

/// A Python module implemented in Rust. The name of this function must match
/// the `lib.name` setting in the `Cargo.toml`, else Python will not be able to
/// import the module.
#[pymodule]
fn movingminmax(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<MovingMinMax>()?;
    m.add_class::<MovingMean>()?;
    m.add_function(wrap_pyfunction!(moving_min_max_offline, m)?)?;
    Ok(())
}
