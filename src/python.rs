use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::core::{Candidate, MovieResult, RecommendationResponse, ScoredCandidate};
use crate::error::MovieEngineError;
use crate::{EngineConfig, MovieEngine as RustMovieEngine, RankOptions, RecommendQuery};

fn to_py_err(e: MovieEngineError) -> PyErr {
    match e {
        MovieEngineError::InvalidInput(msg) => PyErr::new::<pyo3::exceptions::PyValueError, _>(msg),
        other => PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(other.to_string()),
    }
}

/// Rank candidate titles against a query.
///
/// `candidates` is a JSON array string: objects with `id`/`title`, or plain titles.
#[pyfunction]
#[pyo3(signature = (query, candidates, top_k = 5, exclude_top_match = false, deduplicate = false))]
fn rank(
    py: Python,
    query: String,
    candidates: String,
    top_k: usize,
    exclude_top_match: bool,
    deduplicate: bool,
) -> PyResult<Vec<PyObject>> {
    let parsed = Candidate::list_from_json_str(&candidates).map_err(to_py_err)?;
    let options = RankOptions {
        top_k,
        exclude_top_match,
        exclude_id: None,
        deduplicate,
    };

    let ranked = crate::rank_titles(&query, &parsed, &options).map_err(to_py_err)?;
    ranked.iter().map(|s| scored_to_py(py, s)).collect()
}

/// Python wrapper for MovieEngine
#[pyclass]
struct MovieEngine {
    engine: Arc<RustMovieEngine>,
    runtime: Arc<Runtime>,
}

#[pymethods]
impl MovieEngine {
    /// Create an engine from an optional YAML config path (env overrides apply)
    #[new]
    fn new(config_path: Option<String>) -> PyResult<Self> {
        let runtime = Arc::new(
            Runtime::new()
                .map_err(|e| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(e.to_string()))?
        );

        let config = EngineConfig::load(config_path.as_deref().map(std::path::Path::new)).map_err(to_py_err)?;
        let engine = RustMovieEngine::from_config(&config).map_err(to_py_err)?;

        Ok(Self {
            engine: Arc::new(engine),
            runtime,
        })
    }

    /// Recommend movies similar to a title
    fn recommend(&self, query: String, top_k: Option<usize>) -> PyResult<PyObject> {
        let mut request = RecommendQuery::new(query);
        request.top_k = top_k;

        let engine = self.engine.clone();
        let response = self.runtime.block_on(async move {
            engine.recommend(request).await.map_err(to_py_err)
        })?;

        Python::with_gil(|py| recommendation_response_to_py(py, &response))
    }

    /// Look up a movie with details; None when not found
    fn lookup(&self, query: String) -> PyResult<Option<PyObject>> {
        let engine = self.engine.clone();
        let details = self.runtime.block_on(async move {
            engine.lookup(&query).await.map_err(to_py_err)
        })?;

        Python::with_gil(|py| {
            details
                .map(|d| {
                    let dict = PyDict::new(py);
                    dict.set_item("movie", movie_to_py(py, &d.movie)?)?;
                    dict.set_item("tagline", &d.tagline)?;
                    dict.set_item("runtime", d.runtime)?;
                    dict.set_item("cast", &d.cast)?;
                    dict.set_item("crew", &d.crew)?;
                    Ok(dict.into())
                })
                .transpose()
        })
    }
}

fn scored_to_py(py: Python, scored: &ScoredCandidate) -> PyResult<PyObject> {
    let dict = PyDict::new(py);
    dict.set_item("id", scored.id())?;
    dict.set_item("title", scored.title())?;
    dict.set_item("score", scored.score)?;
    dict.set_item("rank", scored.rank)?;
    Ok(dict.into())
}

/// Convert MovieResult to Python dict
fn movie_to_py(py: Python, movie: &MovieResult) -> PyResult<PyObject> {
    let dict = PyDict::new(py);
    dict.set_item("id", movie.id)?;
    dict.set_item("title", &movie.title)?;
    dict.set_item("overview", &movie.overview)?;
    dict.set_item("release_date", &movie.release_date)?;
    dict.set_item("year", movie.year())?;
    dict.set_item("vote_average", movie.vote_average)?;
    dict.set_item("poster_url", movie.poster_url())?;
    dict.set_item("genre_ids", &movie.genre_ids)?;
    Ok(dict.into())
}

/// Convert RecommendationResponse to Python dict
fn recommendation_response_to_py(py: Python, response: &RecommendationResponse) -> PyResult<PyObject> {
    let dict = PyDict::new(py);
    dict.set_item("query", &response.query)?;

    let recommendations: PyResult<Vec<PyObject>> = response
        .recommendations
        .iter()
        .map(|r| {
            let item = PyDict::new(py);
            item.set_item("movie", movie_to_py(py, &r.movie)?)?;
            item.set_item("score", r.score)?;
            item.set_item("rank", r.rank)?;
            Ok(item.into())
        })
        .collect();
    dict.set_item("recommendations", recommendations?)?;

    dict.set_item("candidates_considered", response.candidates_considered)?;
    dict.set_item("provider", &response.provider)?;
    dict.set_item("ranking_method", &response.ranking_method)?;
    dict.set_item("latency_ms", response.latency_ms)?;

    Ok(dict.into())
}

/// Python module
#[pymodule]
fn movie_engine(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(rank, m)?)?;
    m.add_class::<MovieEngine>()?;
    m.add("__version__", crate::VERSION)?;
    Ok(())
}
