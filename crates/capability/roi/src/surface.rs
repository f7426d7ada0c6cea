use domain::Rect;

/// 绘制表面（画布）。坐标均为显示空间。
pub trait RoiSurface {
    /// 清空整个绘制表面
    fn clear(&mut self);

    /// 绘制源帧图像
    fn draw_frame(&mut self);

    /// 描边绘制矩形轮廓
    fn stroke_rect(&mut self, rect: Rect);
}
