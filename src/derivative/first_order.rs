use crate::stencil::Degree;




derivative_engine! {
    /**
     * Centered first derivative, `du/dx`, using the antisymmetric stencil with
     * the given ghost width.
     */
    DerivativeFirstOrder, Degree::First
}
