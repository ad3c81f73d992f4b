//! Сборка CSR-матриц из строк (индекс, значение)

use std::collections::HashMap;

use sprs::CsMat;

/// Строка разреженной матрицы
pub type SparseRow = Vec<(usize, f64)>;

pub fn counts_to_row(counts: HashMap<usize, f64>) -> SparseRow {
    let mut row: SparseRow = counts.into_iter().filter(|(_, v)| *v != 0.0).collect();
    row.sort_unstable_by_key(|(idx, _)| *idx);
    row
}

pub fn l2_normalize(row: &mut SparseRow) {
    let norm = row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, v) in row.iter_mut() {
            *v /= norm;
        }
    }
}

/// Индексы в каждой строке должны быть отсортированы
pub fn csr_from_rows(n_cols: usize, rows: Vec<SparseRow>) -> CsMat<f64> {
    let n_rows = rows.len();
    let nnz: usize = rows.iter().map(Vec::len).sum();
    let mut indptr = Vec::with_capacity(n_rows + 1);
    let mut indices = Vec::with_capacity(nnz);
    let mut data = Vec::with_capacity(nnz);

    indptr.push(0);
    for row in rows {
        for (idx, value) in row {
            indices.push(idx);
            data.push(value);
        }
        indptr.push(indices.len());
    }

    CsMat::new((n_rows, n_cols), indptr, indices, data)
}
