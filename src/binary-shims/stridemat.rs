fn main() { ::stridemat_tasks::entry_points::stridemat() }
