/* ************************************************************************ **
** This file is part of stridemat, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;
use crate::config::{Settings, MatrixSource, Step};

use ::std::collections::BTreeMap;
use ::failure::format_err;
use ::stridemat_matrix::{Matrix, MatrixRef, VectorView, linalg};

type Registry = BTreeMap<String, Matrix>;

pub fn build_matrix(source: &MatrixSource) -> FailResult<Matrix>
{Ok({
    match source {
        MatrixSource::Make { dims, values } => {
            let mut m = Matrix::make(*dims);
            if let Some(values) = values {
                m.copy(values)?;
            }
            m
        },
        MatrixSource::Square(values) => Matrix::make_square(values)?,
        MatrixSource::Raw(config) => Matrix::from_config(config.clone())?,
    }
})}

/// Run every step of a script, returning one block of text per step.
///
/// Stops at the first failing step.
pub fn run_script(settings: &Settings) -> FailResult<Vec<String>>
{
    let mut registry = Registry::new();
    for (name, source) in &settings.matrices {
        let m = build_matrix(source)
            .map_err(|e| format_err!("while building matrix '{}': {}", name, e))?;
        debug!("built '{}' with dims {:?}", name, m.dims());
        registry.insert(name.clone(), m);
    }

    let precision = settings.format.precision;
    let mut blocks = vec![];
    for (i, step) in settings.steps.iter().enumerate() {
        trace!("step {}: {:?}", i, step);
        let block = run_step(&mut registry, step, precision)
            .map_err(|e| format_err!("step {} failed: {}", i, e))?;
        blocks.push(block);
    }
    Ok(blocks)
}

fn lookup<'a>(registry: &'a Registry, name: &str) -> FailResult<&'a Matrix>
{
    registry.get(name)
        .ok_or_else(|| format_err!("no matrix named '{}'", name))
}

fn lookup_mut<'a>(registry: &'a mut Registry, name: &str) -> FailResult<&'a mut Matrix>
{
    registry.get_mut(name)
        .ok_or_else(|| format_err!("no matrix named '{}'", name))
}

fn show_view(view: VectorView<'_>, precision: usize) -> String
{
    if view.is_shrunk() {
        info!("view was shrunk to {} element(s) ({:?})", view.len(), view.kind());
    }
    format!("{:.*}", precision, view)
}

fn run_step(registry: &mut Registry, step: &Step, precision: usize) -> FailResult<String>
{Ok({
    match step {
        Step::Show(name) => lookup(registry, name)?.to_str(),

        Step::Dump(name) => format!("{:?}", lookup(registry, name)?.buffer()),

        Step::Determinant(name) => {
            let det = lookup(registry, name)?.determinant()?;
            info!("det({}) = {}", name, det);
            format!("{}", det)
        },

        Step::Invert { matrix, into } => {
            let inv = lookup(registry, matrix)?.inverting_clone()?;
            let text = inv.to_str();
            if let Some(into) = into {
                registry.insert(into.clone(), inv);
            }
            text
        },

        Step::Mul { operands, into } => {
            // An existing destination is filled in place. It is taken out of the
            // registry meanwhile, so it cannot also be an operand.
            let existing = into.as_ref().and_then(|name| registry.remove(name).map(|m| (name, m)));
            match existing {
                Some((name, mut dst)) => {
                    let result = operand_refs(registry, operands)
                        .and_then(|refs| {
                            linalg::mul_into(&mut dst, &refs)?;
                            Ok(())
                        });
                    let text = dst.to_str();
                    registry.insert(name.clone(), dst);
                    result?;
                    text
                },
                None => {
                    let product = linalg::mul(&operand_refs(registry, operands)?)?;
                    let text = product.to_str();
                    if let Some(name) = into {
                        registry.insert(name.clone(), product);
                    }
                    text
                },
            }
        },

        Step::Row { matrix, index } => show_view(lookup(registry, matrix)?.row_vector_get(*index)?, precision),
        Step::Col { matrix, index } => show_view(lookup(registry, matrix)?.col_vector_get(*index)?, precision),
        Step::Element { matrix, index } => show_view(lookup(registry, matrix)?.e_get(*index)?, precision),

        Step::SetDims { matrix, dims } => {
            lookup_mut(registry, matrix)?.set_dims(*dims).to_str()
        },
        Step::SetStrides { matrix, strides } => {
            lookup_mut(registry, matrix)?.set_strides(*strides).to_str()
        },
    }
})}

fn operand_refs<'a>(registry: &'a Registry, operands: &[String]) -> FailResult<Vec<MatrixRef<'a>>>
{
    operands.iter()
        .map(|name| lookup(registry, name).map(|m| m.as_matrix_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::YamlRead;
    use ::pretty_assertions::assert_eq;
    use ::stridemat_assert_close::assert_close;

    fn run(yaml: &str) -> FailResult<Vec<String>>
    { run_script(&Settings::from_reader(yaml.as_bytes())?) }

    #[test]
    fn determinant_step() {
        let out = run("
matrices: { a: { square: [1, 2, 3, 4, 5, 6, 7, 8, -9] } }
steps: [{ determinant: a }]
").unwrap();
        assert_eq!(out.len(), 1);
        assert_close!(out[0].parse::<f64>().unwrap(), 54.0);
    }

    #[test]
    fn invert_then_multiply() {
        let out = run("
matrices:
  a: { square: [3, -2, 2, 3] }
  b: { make: { dims: [2, 1], values: [1, 2] } }
steps:
  - invert: { matrix: a, into: a-inv }
  - mul: { operands: [a-inv, b], into: x }
  - col: { matrix: x, index: 0 }
").unwrap();
        assert_eq!(out[2], "0.538, 0.308");
    }

    #[test]
    fn mul_into_existing_keeps_its_geometry() {
        let out = run("
matrices:
  a: { square: [1, 2, 3, 4] }
  i: { square: [1, 0, 0, 1] }
  dst: { raw: { dims: [2, 2], strides: [2, 1], buffer: [0, 0, 0, 0] } }
steps:
  - mul: { operands: [a, i], into: dst }
  - dump: dst
").unwrap();
        assert_eq!(out[0], "+1, +2,\n+3, +4,");
        // row-major because of the strides given above
        assert_eq!(out[1], "[1.0, 2.0, 3.0, 4.0]");
    }

    #[test]
    fn mul_destination_cannot_be_an_operand() {
        let err = run("
matrices: { a: { square: [1, 2, 3, 4] } }
steps: [{ mul: { operands: [a, a], into: a } }]
").unwrap_err();
        assert!(err.to_string().contains("no matrix named 'a'"));
    }

    #[test]
    fn shrunk_rows() {
        let out = run("
matrices:
  c: { raw: { dims: [3, 3], strides: [3, 2], buffer: [1, 2, 3, 4, 5, 6, 7] } }
format: { precision: 1 }
steps:
  - row: { matrix: c, index: 0 }
  - row: { matrix: c, index: 1 }
  - element: { matrix: c, index: 2 }
").unwrap();
        assert_eq!(out, vec![
            "1.0, 3.0, 5.0".to_string(),
            "4.0, 6.0".to_string(),
            "7.0".to_string(),
        ]);
    }

    #[test]
    fn geometry_steps() {
        let out = run("
matrices: { a: { square: [1, 2, 3, 4] } }
steps:
  - set-dims: { matrix: a, dims: [1, 2] }
  - set-strides: { matrix: a, strides: [1, 1] }
").unwrap();
        assert_eq!(out, vec!["+1, +2,".to_string(), "+1, +3,".to_string()]);
    }

    #[test]
    fn errors_name_the_step() {
        let err = run("
matrices: { a: { square: [1, 2, 2, 4] } }
steps: [{ show: a }, { invert: { matrix: a } }]
").unwrap_err();
        assert_eq!(err.to_string(), "step 1 failed: matrix is singular");
    }

    #[test]
    fn chain_too_short() {
        let err = run("
matrices: { a: { square: [1, 2, 3, 4] } }
steps: [{ mul: { operands: [a] } }]
").unwrap_err();
        assert_eq!(err.to_string(), "step 0 failed: chain multiplication needs at least 2 operands, got 1");
    }

    #[test]
    fn bad_square() {
        let err = run("
matrices: { a: { square: [1, 2, 3] } }
steps: []
").unwrap_err();
        assert!(err.to_string().starts_with("while building matrix 'a'"));
    }
}
